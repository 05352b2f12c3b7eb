//! A short calculator session: build a few matrices, query them, solve a system with both
//! solvers, and round-trip one matrix through a text dump.
//!
//! Output is printed to stdout.

use linear::{Cramer, Dense, LSolver};
use matrix::{DenseMatrix, Fill};
use nalgebra::dvector;
use session::{text, Repository};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut repo = Repository::new();

    repo.insert(
        "A",
        DenseMatrix::from_rows(&[[2.0, -3.0, 1.0], [2.0, 0.0, -1.0], [1.0, 4.0, 5.0]])?,
    )?;
    repo.insert("I", DenseMatrix::identity(3)?)?;
    let random = repo.insert_auto(DenseMatrix::with_fill(3, 3, Fill::RandomInteger)?);

    for (name, m) in repo.iter() {
        println!("{} ({}x{}), rank {}:\n{}", name, m.rows(), m.cols(), m.rank(), m);
    }

    let a = repo.get("A")?;
    println!("det(A) = {}", a.determinant()?);
    println!("tr(A) = {}", a.trace()?);

    let sum = a.add(repo.get("I")?)?;
    println!("A + I =\n{}", sum);

    let product = a.matrix_multiply(repo.get(&random)?)?;
    println!("A * {} =\n{}", random, product);

    let b = dvector![1.0, 2.0, 3.0];
    let solvers: [&dyn LSolver; 2] = [&Cramer, &Dense];
    for solver in solvers {
        let x = solver.solve(a, &b)?;
        println!("{:?}: x = {}", solver.get_type(), x.transpose());
    }

    let dump = text::to_text(a);
    println!("text dump of A:\n{}", dump);
    assert_eq!(&text::parse_matrix(&dump)?, a);

    Ok(())
}
