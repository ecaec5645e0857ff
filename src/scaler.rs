use rayon::prelude::*;

/// Precomputed source row/column for every destination pixel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        let axis = |dst: usize, src: usize| -> Vec<usize> {
            (0..dst)
                .map(|d| (d * src / dst.max(1)).min(src.saturating_sub(1)))
                .collect()
        };
        Self {
            src_x: axis(dst_w, src_w),
            src_y: axis(dst_h, src_h),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

/// Nearest-neighbour stretch of `src` (row stride `src_w`) into `dst`.
/// Rows are processed in parallel.
pub fn blit_nearest(dst: &mut [u32], src: &[u32], src_w: usize, lut: &ScaleLut) {
    let dw = lut.src_x.len();
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw)
        .zip(lut.src_y.par_iter())
        .for_each(|(dst_row, &sy)| {
            let row = &src[sy * src_w..(sy + 1) * src_w];
            for (d, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
                *d = row[sx];
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_copy() {
        let src: Vec<u32> = (0..12).collect();
        let lut = ScaleLut::new(4, 3, 4, 3);
        let mut dst = vec![0; 12];
        blit_nearest(&mut dst, &src, 4, &lut);
        assert_eq!(dst, src);
    }

    #[test]
    fn doubles_pixels() {
        let src = vec![1, 2, 3, 4];
        let lut = ScaleLut::new(4, 4, 2, 2);
        let mut dst = vec![0; 16];
        blit_nearest(&mut dst, &src, 2, &lut);
        assert_eq!(
            dst,
            vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn shrinking_stays_in_bounds() {
        let lut = ScaleLut::new(3, 2, 10, 7);
        assert_eq!(lut.dst_size(), (3, 2));
        assert!(lut.src_x.iter().all(|&x| x < 10));
        assert!(lut.src_y.iter().all(|&y| y < 7));
    }
}
