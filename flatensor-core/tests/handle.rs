use flatensor_core::{
    Bounds, Env, EnvConfig, Error, NumVarArray, RangeArray, VarTensor, R3,
};

#[test]
fn one_bulk_allocation() {
    let env = Env::new();
    let x = VarTensor::<NumVarArray, 4>::new(&env, [4, 3, 2, 5]).unwrap();
    assert_eq!(x.len(), 120);
    assert_eq!(x.strides(), &[4, 12, 24, 120]);
    let stats = env.stats();
    assert_eq!(stats.vars, 120);
    assert_eq!(stats.collections, 1);
}

#[test]
fn offsets_match_owning_tensor() {
    let env = Env::new();
    let x = VarTensor::<NumVarArray, 2>::new(&env, [3, 4]).unwrap();
    assert_eq!(x[[0, 0]].id(), 0);
    assert_eq!(x[[2, 3]].id(), 11);
    assert_eq!(x.get([1, 2]), &x.handles()[7]);
    assert_eq!(x.collection()[7], x[[1, 2]]);
}

#[test]
fn default_bounds() {
    let env = Env::new();
    let x = VarTensor::<NumVarArray, 3>::of::<R3<2, 2, 2>>(&env).unwrap();
    assert_eq!(x[[1, 1, 1]].bounds().unwrap(), Bounds::NON_NEGATIVE);
}

#[test]
fn configured_upper_bound() {
    let env = Env::with_config(EnvConfig {
        default_bounds: Bounds::upper(10.0).unwrap(),
    });
    let x = VarTensor::<NumVarArray, 2>::new(&env, [2, 2]).unwrap();
    assert_eq!(x[[1, 0]].ub().unwrap(), 10.0);
    assert_eq!(x[[1, 0]].lb().unwrap(), 0.0);
}

#[test]
fn handles_mutate_through_the_env() {
    let env = Env::new();
    let x = VarTensor::<NumVarArray, 2>::new(&env, [3, 3]).unwrap();
    x[[2, 1]].set_bounds(Bounds::new(-5.0, 5.0).unwrap()).unwrap();
    x[[2, 1]].set_name("x_2_1").unwrap();
    assert_eq!(x.handles()[5].lb().unwrap(), -5.0);
    assert_eq!(x.handles()[5].name().unwrap().as_deref(), Some("x_2_1"));
    assert_eq!(x[[0, 0]].name().unwrap(), None);
}

#[test]
fn range_rows() {
    let env = Env::new();
    let rows =
        VarTensor::<RangeArray, 2>::with_bounds(&env, [2, 5], Bounds::new(-1.0, 1.0).unwrap())
            .unwrap();
    assert_eq!(rows[[1, 4]].id(), 9);
    assert_eq!(rows[[1, 4]].lb().unwrap(), -1.0);
    assert_eq!(env.stats().ranges, 10);
    assert_eq!(env.stats().vars, 0);
}

#[test]
fn invalid_bounds_fail_construction() {
    let env = Env::new();
    let err = VarTensor::<NumVarArray, 2>::with_bounds(&env, [2, 2], Bounds { lb: 3.0, ub: 1.0 })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBounds { .. }));
    assert_eq!(env.stats().collections, 0);
}

#[test]
fn zero_dim_fails_before_allocating() {
    let env = Env::new();
    assert!(matches!(
        VarTensor::<NumVarArray, 2>::new(&env, [0, 2]),
        Err(Error::ZeroDim { axis: 0 })
    ));
    assert_eq!(env.stats().vars, 0);
}

#[test]
fn env_end_finalizes_tensor_handles() {
    let env = Env::new();
    let x = VarTensor::<NumVarArray, 2>::new(&env, [2, 2]).unwrap();
    let y = VarTensor::<NumVarArray, 1>::new(&env, [3]).unwrap();
    assert_eq!(env.stats().collections, 2);
    env.end();
    assert_eq!(env.stats().collections, 0);
    assert!(matches!(x[[1, 1]].lb(), Err(Error::EnvEnded)));
    assert!(matches!(y[[0]].set_name("y"), Err(Error::EnvEnded)));
    assert!(matches!(
        VarTensor::<NumVarArray, 1>::new(&env, [3]),
        Err(Error::EnvEnded)
    ));
}

#[test]
fn runtime_rank_lookup() {
    let env = Env::new();
    let x = VarTensor::<NumVarArray, 3>::new(&env, [2, 3, 4]).unwrap();
    assert_eq!(x.try_get(&[1, 2, 3]).unwrap().id(), 23);
    assert!(matches!(
        x.try_get(&[1, 2]),
        Err(Error::DimensionalityMismatch {
            expected: 3,
            got: 2
        })
    ));
    assert!(matches!(
        x.try_get(&[0, 3, 0]),
        Err(Error::IndexOutOfRange { axis: 1, .. })
    ));
}
