//! Operator-basis property tests across register sizes

use qtomo_core::{BasisError, OperatorBasis, PauliString};

#[test]
fn basis_has_four_to_the_n_operators() {
    for n in 1..=3 {
        let basis = OperatorBasis::build(n).unwrap();
        assert_eq!(basis.len(), 4usize.pow(n as u32));
        assert_eq!(basis.dimension(), 1usize << n);
    }
}

#[test]
fn zero_qubits_is_rejected() {
    assert!(matches!(
        OperatorBasis::build(0),
        Err(BasisError::InvalidDimension { num_qubits: 0 })
    ));
}

#[test]
fn every_operator_is_hermitian_on_three_qubits() {
    let basis = OperatorBasis::build(3).unwrap();
    let dim = basis.dimension();

    for op in basis.iter() {
        for i in 0..dim {
            for j in 0..dim {
                let diff = (op.matrix[i * dim + j] - op.matrix[j * dim + i].conj()).norm();
                assert!(diff < 1e-14, "{} fails Hermiticity at ({}, {})", op.string, i, j);
            }
        }
    }
}

#[test]
fn trace_inner_products_are_orthogonal_on_one_qubit() {
    let basis = OperatorBasis::build(1).unwrap();
    let d = basis.dimension() as f64;

    for i in 0..basis.len() {
        for j in 0..basis.len() {
            let ip = basis.trace_inner_product(i, j).unwrap();
            let expected = if i == j { d } else { 0.0 };
            assert!((ip - expected).norm() < 1e-13);
        }
    }
}

#[test]
fn labels_round_trip_through_parsing() {
    let basis = OperatorBasis::build(2).unwrap();
    for op in basis.iter() {
        let reparsed = PauliString::from_label(&op.string.label()).unwrap();
        assert_eq!(reparsed, op.string);
    }
}

#[test]
fn matrices_match_their_labels() {
    let basis = OperatorBasis::build(2).unwrap();
    for op in basis.iter() {
        let rebuilt = PauliString::from_label(&op.string.label()).unwrap().matrix();
        assert_eq!(rebuilt, op.matrix);
    }
}
