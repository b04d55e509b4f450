//! Row-major index arithmetic for N-dimensional code arrays.
//!
//! Linear indices enumerate elements with the last axis varying fastest.
//! [`unravel`] and [`ravel`] are exact inverses for every valid index, so
//! a coordinate recovered from a linear index always ravels back to it.

use crate::utils::errors::ShapeError;

/// Checks that `shape` addresses at least one element along every axis.
pub fn check_shape(shape: &[usize]) -> Result<(), ShapeError> {
    if shape.is_empty() {
        return Err(ShapeError::ZeroDimensional);
    }

    if let Some(axis) = shape.iter().position(|&len| len == 0) {
        return Err(ShapeError::EmptyAxis {
            axis,
            shape: shape.to_vec(),
        });
    }

    Ok(())
}

/// Total element count of `shape`.
pub fn size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Converts a linear index into row-major coordinates for `shape`.
pub fn unravel(index: usize, shape: &[usize]) -> Result<Vec<usize>, ShapeError> {
    check_shape(shape)?;

    let total = size(shape);
    if index >= total {
        return Err(ShapeError::IndexOutOfBounds {
            index,
            size: total,
            shape: shape.to_vec(),
        });
    }

    let mut coord = vec![0; shape.len()];
    let mut rest = index;
    for (axis, &len) in shape.iter().enumerate().rev() {
        coord[axis] = rest % len;
        rest /= len;
    }

    Ok(coord)
}

/// Converts row-major coordinates back into a linear index for `shape`.
pub fn ravel(coord: &[usize], shape: &[usize]) -> Result<usize, ShapeError> {
    check_shape(shape)?;

    if coord.len() != shape.len() {
        return Err(ShapeError::RankMismatch {
            got: coord.len(),
            expected: shape.len(),
        });
    }

    let mut index = 0;
    for (axis, (&c, &len)) in coord.iter().zip(shape).enumerate() {
        if c >= len {
            return Err(ShapeError::CoordinateOutOfBounds {
                coord: coord.to_vec(),
                axis,
                shape: shape.to_vec(),
            });
        }
        index = index * len + c;
    }

    Ok(index)
}

#[test]
fn unravel_known_coordinates() -> anyhow::Result<()> {
    assert_eq!(unravel(0, &[2, 2])?, vec![0, 0]);
    assert_eq!(unravel(1, &[2, 2])?, vec![0, 1]);
    assert_eq!(unravel(2, &[2, 2])?, vec![1, 0]);
    assert_eq!(unravel(3, &[2, 2])?, vec![1, 1]);

    assert_eq!(unravel(23, &[2, 3, 4])?, vec![1, 2, 3]);
    assert_eq!(unravel(6, &[7])?, vec![6]);
    Ok(())
}

#[test]
fn ravel_unravel_round_trip() -> anyhow::Result<()> {
    for shape in [vec![7], vec![2, 2], vec![3, 4, 5], vec![1, 6, 1, 2]] {
        for index in 0..size(&shape) {
            let coord = unravel(index, &shape)?;
            assert_eq!(ravel(&coord, &shape)?, index, "shape {shape:?}");
        }
    }
    Ok(())
}

#[test]
fn degenerate_shapes_rejected() {
    assert!(matches!(unravel(0, &[]), Err(ShapeError::ZeroDimensional)));
    assert!(matches!(
        unravel(0, &[3, 0]),
        Err(ShapeError::EmptyAxis { axis: 1, .. })
    ));
    assert!(matches!(
        unravel(4, &[2, 2]),
        Err(ShapeError::IndexOutOfBounds { index: 4, .. })
    ));
    assert!(matches!(
        ravel(&[0, 0, 0], &[2, 2]),
        Err(ShapeError::RankMismatch { got: 3, expected: 2 })
    ));
    assert!(matches!(
        ravel(&[0, 2], &[2, 2]),
        Err(ShapeError::CoordinateOutOfBounds { axis: 1, .. })
    ));
}
