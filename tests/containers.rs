use octalg::{BigDecimal, prelude::*, storage::StorageConstruction};

fn oct(s: &str) -> OctonionValue {
    s.parse().unwrap()
}

#[test]
fn rank_four_contraction_keeps_dimension_count() -> anyhow::Result<()> {
    let alg = OctonionTensorAlgebra::new(OctonionAlgebra::new());
    let mut a = alg.construct_with(StorageConstruction::MemArray, 4, 2);
    a.set(&[1, 0, 1, 1], &oct("{0,1}"))?;
    a.set(&[0, 0, 0, 1], &oct("2"))?;
    let mut b = alg.construct();
    alg.contract(0, 2, &a, &mut b)?;
    assert_eq!((b.rank(), b.dim_count()), (2, 2));
    // b[y][w] = a[0][y][0][w] + a[1][y][1][w]
    assert_eq!(b.get(&[0, 1])?, &oct("{2,1}"));
    b.set(&[0, 1], &alg.scalar().construct())?;
    assert!(alg.is_zero(&b));
    Ok(())
}

#[test]
fn tensor_inner_product_matches_vector_dot_product() -> anyhow::Result<()> {
    let scalar = OctonionAlgebra::new();
    let tensors = OctonionTensorAlgebra::new(scalar);
    let vectors = OctonionVectorAlgebra::new(scalar);

    let text = "[{1,2},{0,0,1},{3,0,0,0,0,-1}]";
    let t = tensors.construct_from_str(text)?;
    let v = vectors.construct_from_str(text)?;

    let mut s = tensors.construct();
    tensors.inner_product(0, 0, &t, &t, &mut s)?;
    let mut d = scalar.construct();
    vectors.dot_product(&v, &v, &mut d)?;
    assert_eq!(s.rank(), 0);
    assert_eq!(s.get(&[])?, &d);
    Ok(())
}

#[test]
fn identity_matrix_is_unity_with_unit_determinant() -> anyhow::Result<()> {
    let alg = OctonionMatrixAlgebra::new(OctonionAlgebra::new());
    let m = alg.identity(2)?;
    assert!(alg.is_unity(&m));
    let mut d = alg.scalar().construct();
    alg.det(&m, &mut d)?;
    assert!(alg.scalar().is_unity(&d));

    let parsed = alg.construct_from_str("[[1,0][0,1]]")?;
    assert_eq!(parsed, m);
    Ok(())
}

#[test]
fn mismatched_tensor_shapes_leave_output_unchanged() -> anyhow::Result<()> {
    let alg = OctonionTensorAlgebra::new(OctonionAlgebra::new());
    let a = alg.construct_with(StorageConstruction::MemArray, 2, 3);
    let b = alg.construct_with(StorageConstruction::MemArray, 2, 4);
    let mut c = alg.construct_from_str("[[1,2][3,4]]")?;
    let before = c.clone();
    let err = alg.add(&a, &b, &mut c).unwrap_err();
    assert!(matches!(err, AlgebraError::ShapeMismatch { .. }));
    assert!(err.is_invalid_argument());
    assert_eq!(c, before);
    Ok(())
}

#[test]
fn matrix_transcendentals_of_a_diagonal_agree_with_scalars() -> anyhow::Result<()> {
    let scalar = OctonionAlgebra::new();
    let alg = OctonionMatrixAlgebra::new(scalar);
    let x = oct("{0.2,0.1}");
    let mut m = alg.construct_with(StorageConstruction::MemArray, 2, 2);
    m.set(0, 0, &x)?;
    m.set(1, 1, &x)?;

    let tol: BigDecimal = "1e-30".parse().unwrap();
    let (mut mexp, mut sexp) = (alg.construct(), scalar.construct());
    alg.exp(&m, &mut mexp)?;
    scalar.exp(&x, &mut sexp)?;
    assert!(scalar.within(&tol, mexp.get(1, 1)?, &sexp)?);
    assert!(scalar.is_zero(mexp.get(0, 1)?));

    let (mut msin, mut ssin) = (alg.construct(), scalar.construct());
    alg.sin(&m, &mut msin)?;
    scalar.sin(&x, &mut ssin)?;
    assert!(scalar.within(&tol, msin.get(0, 0)?, &ssin)?);
    Ok(())
}

#[test]
fn spectral_norm_bounds_vector_growth() -> anyhow::Result<()> {
    let scalar = OctonionAlgebra::new();
    let matrices = OctonionMatrixAlgebra::new(scalar);
    let vectors = OctonionVectorAlgebra::new(scalar);
    let a = matrices.construct_from_str("[[1,{0,1}][0,2]]")?;
    let mut sigma = BigDecimal::default();
    matrices.norm(&a, &mut sigma)?;

    let mut column = vectors.construct();
    let mut n = BigDecimal::default();
    for c in 0..2 {
        matrices.column(&a, c, &mut column)?;
        vectors.norm(&column, &mut n)?;
        assert!(n <= sigma);
    }
    Ok(())
}

#[test]
fn sparse_and_dense_storage_compare_by_value() -> anyhow::Result<()> {
    let alg = OctonionVectorAlgebra::new(OctonionAlgebra::new());
    let mut sparse = alg.construct_with(StorageConstruction::MemSparse, 3);
    sparse.set(1, &oct("{0,0,1}"))?;
    let dense = alg.construct_from_str("[0,{0,0,1},0]")?;
    assert_eq!(sparse, dense);
    assert_eq!(sparse.thread_access(), ThreadAccess::Confined);
    assert_eq!(dense.thread_access(), ThreadAccess::Any);
    Ok(())
}
