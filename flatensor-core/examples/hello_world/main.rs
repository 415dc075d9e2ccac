use flatensor_core::{Bounds, Env, NumVarArray, Tensor, VarTensor, R2, R3};

fn main() {
    let mut grid = Tensor::<f32, 2>::zeros_of::<R2<3, 4>>().unwrap();
    for j in 0..4 {
        for i in 0..3 {
            grid[[i, j]] = (i + 10 * j) as f32;
        }
    }
    dbg!(grid.strides(), grid.as_slice());
    assert_eq!(grid[[2, 3]], 32.0);

    let env = Env::new();
    let x = VarTensor::<NumVarArray, 3>::of::<R3<2, 3, 4>>(&env).unwrap();
    for (offset, var) in x.handles().iter().enumerate() {
        let [i, j, k] = x.layout().unravel(offset);
        var.set_name(format!("x_{i}_{j}_{k}")).unwrap();
    }
    x[[1, 2, 3]].set_bounds(Bounds::upper(1.0).unwrap()).unwrap();
    dbg!(x[[1, 2, 3]].name().unwrap(), x[[1, 2, 3]].bounds().unwrap());
    dbg!(env.stats());
    env.end();
}
