//! Preview layout

/// Size to draw an `image`-sized bitmap at, scaled to fit while keeping
/// its aspect ratio.
///
/// Full-screen captures may use all of `available`; region captures are
/// additionally held inside `max_box`.
pub fn preview_size(image: (u32, u32), available: [f32; 2], is_full_screen: bool, max_box: [f32; 2]) -> [f32; 2] {
    let (width, height) = (image.0 as f32, image.1 as f32);
    if width <= 0.0 || height <= 0.0 {
        return [0.0, 0.0];
    }

    let bounds = if is_full_screen {
        available
    } else {
        [available[0].min(max_box[0]), available[1].min(max_box[1])]
    };

    let scale = (bounds[0] / width).min(bounds[1] / height).max(0.0);
    [width * scale, height * scale]
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: [f32; 2] = [600.0, 400.0];

    fn assert_close(actual: [f32; 2], expected: [f32; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < 1e-3 && (actual[1] - expected[1]).abs() < 1e-3,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn full_screen_fills_available_space() {
        let size = preview_size((2880, 1800), [800.0, 500.0], true, MAX);
        assert_close(size, [800.0, 500.0]);
    }

    #[test]
    fn region_is_held_inside_max_box() {
        let size = preview_size((1000, 1000), [800.0, 500.0], false, MAX);
        assert_close(size, [400.0, 400.0]);
    }

    #[test]
    fn small_region_scales_up_to_box() {
        let size = preview_size((100, 50), [1200.0, 900.0], false, MAX);
        assert_close(size, [600.0, 300.0]);
    }

    #[test]
    fn region_box_shrinks_with_window() {
        let size = preview_size((200, 100), [300.0, 900.0], false, MAX);
        assert_close(size, [300.0, 150.0]);
    }

    #[test]
    fn empty_image_has_no_size() {
        assert_eq!(preview_size((0, 10), [800.0, 500.0], true, MAX), [0.0, 0.0]);
    }
}
