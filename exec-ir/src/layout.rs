/// Tensor axis layout. Only the two layouts the original runtime distinguishes are modeled; any
/// other rank is passed through unpermuted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    Nhwc,
    Nchw,
}

/// Permutes a shape from `from` layout to `to` layout. Only rank-4 shapes are actually
/// transposed (NHWC <-> NCHW); any other rank is returned unchanged, matching the source
/// runtime's behavior of leaving non-feature-map tensors alone.
pub fn permute_shape(shape: &[usize], from: Layout, to: Layout) -> Vec<usize> {
    if from == to || shape.len() != 4 {
        return shape.to_vec();
    }
    match (from, to) {
        (Layout::Nhwc, Layout::Nchw) => vec![shape[0], shape[3], shape[1], shape[2]],
        (Layout::Nchw, Layout::Nhwc) => vec![shape[0], shape[2], shape[3], shape[1]],
        _ => unreachable!("from != to was already handled above"),
    }
}
