use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flatensor_core::{Bounds, Env, NumVarArray, Tensor, VarTensor, R4};

/// One allocation per level, released level by level on drop.
type Nested4<T> = Vec<Vec<Vec<Vec<T>>>>;

fn nested_zeros(n: usize) -> Nested4<i32> {
    (0..n)
        .map(|_| (0..n).map(|_| (0..n).map(|_| vec![0; n]).collect()).collect())
        .collect()
}

fn bench_nested_traversal(c: &mut Criterion) {
    const N: usize = 48;
    let tensor = nested_zeros(N);
    c.bench_function("nested_traversal_48", |bencher| {
        bencher.iter(|| {
            for i in 0..N {
                for j in 0..N {
                    for k in 0..N {
                        for m in 0..N {
                            black_box(&tensor[j][i][k][m]);
                        }
                    }
                }
            }
        });
    });
}

fn bench_flat_traversal(c: &mut Criterion) {
    const N: usize = 48;
    let tensor = Tensor::<i32, 4>::from_vec(vec![0; N * N * N * N], [N, N, N, N]).unwrap();
    c.bench_function("flat_traversal_48", |bencher| {
        bencher.iter(|| {
            for i in 0..N {
                for j in 0..N {
                    for k in 0..N {
                        for m in 0..N {
                            black_box(&tensor[[j, i, k, m]]);
                        }
                    }
                }
            }
        });
    });
}

fn bench_nested_var_traversal(c: &mut Criterion) {
    const N: usize = 32;
    let env = Env::new();
    let vars: Vec<Vec<Vec<NumVarArray>>> = (0..N)
        .map(|_| {
            (0..N)
                .map(|_| {
                    (0..N)
                        .map(|_| env.num_var_array(N, Bounds::NON_NEGATIVE).unwrap())
                        .collect()
                })
                .collect()
        })
        .collect();
    c.bench_function("nested_var_traversal_32", |bencher| {
        bencher.iter(|| {
            for i in 0..N {
                for j in 0..N {
                    for k in 0..N {
                        for m in 0..N {
                            black_box(&vars[i][j][k][m]);
                        }
                    }
                }
            }
        });
    });
    drop(vars);
    env.end();
}

fn bench_flat_var_traversal(c: &mut Criterion) {
    const N: usize = 32;
    let env = Env::new();
    let vars = VarTensor::<NumVarArray, 4>::of::<R4<N, N, N, N>>(&env).unwrap();
    c.bench_function("flat_var_traversal_32", |bencher| {
        bencher.iter(|| {
            for i in 0..N {
                for j in 0..N {
                    for k in 0..N {
                        for m in 0..N {
                            black_box(&vars[[i, j, k, m]]);
                        }
                    }
                }
            }
        });
    });
    drop(vars);
    env.end();
}

criterion_group!(
    benches,
    bench_nested_traversal,
    bench_flat_traversal,
    bench_nested_var_traversal,
    bench_flat_var_traversal
);
criterion_main!(benches);
