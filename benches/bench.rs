use criterion::{criterion_group, criterion_main, Criterion};
use dlx_sudoku::dlx::search::SolverControl;
use dlx_sudoku::sudoku::solver::{Board, Sudoku, EXAMPLE_NINE};
use std::hint::black_box;

const HARD_LINE: &str =
    "005902000279008040800300002300091057020000080580420006100009003090200571000605800";

fn bench_sudoku(c: &mut Criterion) {
    let hard = Sudoku::from_line(HARD_LINE).unwrap();
    c.bench_function("9x9 - first solution", |b| {
        b.iter(|| black_box(hard.first_solution()))
    });

    let classic = Sudoku::new(Board::from(EXAMPLE_NINE)).unwrap();
    c.bench_function("9x9 - encode", |b| b.iter(|| black_box(classic.encode())));

    let empty = Sudoku::new(Board::new(vec![vec![0; 4]; 4])).unwrap();
    c.bench_function("4x4 - enumerate all completions", |b| {
        b.iter(|| {
            let mut count = 0;
            empty.solve(|_| {
                count += 1;
                SolverControl::Continue
            });
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_sudoku);

criterion_main!(benches);
