use crate::geometry::primitives::Rect;

/// Subtracts `placed` from `free` with straight edge-to-edge cuts.
///
/// Emits up to four residual strips, each clipped to `free`: above and below `placed` spanning the full width of `free`,
/// left and right of `placed` spanning only its vertical extent. Strips without a positive area are omitted.
/// If `placed` does not overlap `free`, `free` is returned unchanged.
pub fn split(free: &Rect, placed: &Rect) -> Vec<Rect> {
    let Some(overlap) = Rect::intersection(free, placed) else {
        return vec![*free];
    };
    let mut residuals = Vec::with_capacity(4);

    //top strip
    if placed.top() > free.top() {
        residuals.push(Rect::new(
            free.left(),
            free.top(),
            free.width,
            placed.top() - free.top(),
        ));
    }
    //bottom strip
    if placed.bottom() < free.bottom() {
        residuals.push(Rect::new(
            free.left(),
            placed.bottom(),
            free.width,
            free.bottom() - placed.bottom(),
        ));
    }

    //left and right strips only span the vertical extent of the overlap
    if placed.left() > free.left() {
        residuals.push(Rect::new(
            free.left(),
            overlap.top(),
            placed.left() - free.left(),
            overlap.height,
        ));
    }
    if placed.right() < free.right() {
        residuals.push(Rect::new(
            placed.right(),
            overlap.top(),
            free.right() - placed.right(),
            overlap.height,
        ));
    }

    residuals.retain(|r| r.width > 0.0 && r.height > 0.0);
    residuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;

    #[test]
    fn placement_at_origin_leaves_bottom_and_right() {
        let free = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let placed = Rect::new(0.0, 0.0, 300.0, 500.0);
        let residuals = split(&free, &placed);
        assert_eq!(
            residuals,
            vec![
                Rect::new(0.0, 500.0, 1000.0, 300.0),
                Rect::new(300.0, 0.0, 700.0, 500.0),
            ]
        );
        let covered: f64 = residuals.iter().map(|r| r.area()).sum();
        assert_eq!(covered + placed.area(), free.area());
    }

    #[test]
    fn exact_fit_leaves_nothing() {
        let free = Rect::new(300.0, 0.0, 300.0, 500.0);
        assert!(split(&free, &free).is_empty());
    }

    #[test]
    fn centered_placement_leaves_four_strips() {
        let free = Rect::new(0.0, 0.0, 100.0, 100.0);
        let placed = Rect::new(40.0, 40.0, 20.0, 20.0);
        let residuals = split(&free, &placed);
        assert_eq!(
            residuals,
            vec![
                Rect::new(0.0, 0.0, 100.0, 40.0),
                Rect::new(0.0, 60.0, 100.0, 40.0),
                Rect::new(0.0, 40.0, 40.0, 20.0),
                Rect::new(60.0, 40.0, 40.0, 20.0),
            ]
        );
    }

    #[test]
    fn partial_overlap_is_clipped_to_free() {
        let free = Rect::new(0.0, 0.0, 100.0, 100.0);
        let placed = Rect::new(80.0, 90.0, 50.0, 50.0);
        let residuals = split(&free, &placed);
        assert_eq!(
            residuals,
            vec![
                Rect::new(0.0, 0.0, 100.0, 90.0),
                Rect::new(0.0, 90.0, 80.0, 10.0),
            ]
        );
        assert!(residuals.iter().all(|r| free.contains(r)));
    }

    #[test]
    fn disjoint_placement_is_a_no_op() {
        let free = Rect::new(0.0, 0.0, 100.0, 100.0);
        let placed = Rect::new(100.0, 0.0, 50.0, 50.0);
        assert_eq!(split(&free, &placed), vec![free]);
    }
}
