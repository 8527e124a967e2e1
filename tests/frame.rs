mod tests {
    use keyframe_composer::color::{BLACK, DEFAULT_GAMMA, Rgb, rgb_from_u32};
    use keyframe_composer::frame::{Window, active_window, generate_frame};
    use keyframe_composer::model::{AnimationModel, Channel, Keyframe};
    use keyframe_composer::presets;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn model(strip_length: usize, keyframes: &[(f32, f32)], colors: &[Rgb]) -> AnimationModel {
        let keyframes: Vec<Keyframe> = keyframes
            .iter()
            .map(|&(start, end)| Keyframe::new(start, end))
            .collect();
        let channel = Channel::new(&keyframes, colors).unwrap();
        AnimationModel::new(strip_length).with_channel(channel).unwrap()
    }

    fn render(model: &AnimationModel, phase: f32) -> Vec<Rgb> {
        let mut frame = vec![BLACK; model.strip_length()];
        generate_frame(model, phase, DEFAULT_GAMMA, &mut frame);
        frame
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn test_rgb_sweep_at_half_phase() {
        let model = model(
            18,
            &[(0.0, 0.0), (0.25, 0.75), (0.0, 1.0)],
            &[RED, GREEN, BLUE],
        );
        let frame = render(&model, 0.5);
        assert_eq!(frame.len(), 18);

        // Window is [4.5, 13.5], three stops of 3 pixels each
        for pixel in 5..13 {
            assert!(frame[pixel].r >= frame[pixel + 1].r, "red rises at {pixel}");
            assert!(frame[pixel].b <= frame[pixel + 1].b, "blue falls at {pixel}");
        }
        // Green rises into the middle stop and falls toward blue
        assert!(frame[5].g < frame[6].g && frame[6].g < frame[7].g);
        assert!(frame[8].g > frame[9].g && frame[9].g > frame[10].g);
        assert!(frame[7].g.abs_diff(frame[8].g) <= 1);
        let peak = (5..=13).max_by_key(|&pixel| frame[pixel].g).unwrap();
        assert!((7..=8).contains(&peak), "green peaks at {peak}");
        assert_eq!(frame[11].g, 0);
        assert!(frame[5].r > frame[5].g);
        assert_eq!(frame[5].b, 0);
        assert_eq!(frame[8].r, 0);
        assert_eq!(frame[13], BLUE);

        // Fade-in before the window
        assert_eq!(frame[0], BLACK);
        assert_eq!(frame[1], BLACK);
        assert!(frame[2].r < frame[3].r && frame[3].r < frame[4].r);
        assert_eq!((frame[4].g, frame[4].b), (0, 0));

        // Fade-out after the window
        assert!(frame[14].b > frame[15].b && frame[15].b > frame[16].b);
        assert!(frame[16].b > 0);
        assert_eq!((frame[14].r, frame[14].g), (0, 0));
        assert_eq!(frame[17], BLACK);
    }

    #[test]
    fn test_frame_length_for_every_phase() {
        let model = model(
            18,
            &[(0.0, 0.0), (0.25, 0.75), (0.0, 1.0)],
            &[RED, GREEN, BLUE],
        );
        for step in 0..1000 {
            let phase = step as f32 / 1000.0;
            assert_eq!(render(&model, phase).len(), 18);
        }
        assert_eq!(render(&model, 0.999_999).len(), 18);
        assert_eq!(render(&model, 1.0).len(), 18);
    }

    #[test]
    fn test_pixels_past_strip_length_are_cleared() {
        let model = model(10, &[(0.0, 1.0), (0.0, 1.0)], &[WHITE]);
        let mut frame = [RED; 16];
        generate_frame(&model, 0.3, DEFAULT_GAMMA, &mut frame);
        assert!(frame[..10].iter().all(|pixel| *pixel == WHITE));
        assert!(frame[10..].iter().all(|pixel| *pixel == BLACK));
    }

    #[test]
    fn test_loop_seam_is_continuous() {
        let model = model(
            18,
            &[(0.1, 0.4), (0.5, 0.8), (0.1, 0.4)],
            &[rgb_from_u32(0xFF_80_00), rgb_from_u32(0x00_80_FF)],
        );
        let end = render(&model, 0.999_999);
        let start = render(&model, 0.0);
        for (a, b) in end.iter().zip(start.iter()) {
            assert!(a.r.abs_diff(b.r) <= 2, "{a:?} vs {b:?}");
            assert!(a.g.abs_diff(b.g) <= 2, "{a:?} vs {b:?}");
            assert!(a.b.abs_diff(b.b) <= 2, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_zero_width_window_draws_single_pixel() {
        let model = model(10, &[(0.5, 0.5), (0.5, 0.5)], &[GREEN]);
        let frame = render(&model, 0.4);
        for (index, pixel) in frame.iter().enumerate() {
            let expected = if index == 5 { GREEN } else { BLACK };
            assert_eq!(*pixel, expected, "pixel {index}");
        }
    }

    #[test]
    fn test_window_end_wraps_onto_strip_start() {
        let model = model(10, &[(0.9, 1.0), (0.9, 1.0)], &[WHITE]);
        let frame = render(&model, 0.0);
        assert_eq!(frame[9], WHITE);
        assert_eq!(frame[0], WHITE);
        assert_eq!(frame[1], BLACK);
        assert_eq!(frame[8], BLACK);
    }

    #[test]
    fn test_window_start_fades_in_across_strip_end() {
        let teal = rgb_from_u32(0x00_50_50);
        // Window is [0, 1.8] with one stop, so one segment is 1.8 pixels
        let frame = render(&presets::teal_bar(18).unwrap(), 0.0);

        assert_eq!(frame[0], teal);
        assert_eq!(frame[1], teal);

        // Leading fade wraps onto the strip end
        assert_eq!(frame[17].r, 0);
        assert!(frame[17].g > 0 && frame[17].g < teal.g);
        assert_eq!(frame[17].g, frame[17].b);
        assert_eq!(frame[16], BLACK);

        // Trailing fade after the window
        assert!(frame[2].g < teal.g && frame[2].g > frame[3].g);
        assert!(frame[3].g > 0);
        assert!(frame[4..16].iter().all(|pixel| *pixel == BLACK));
    }

    #[test]
    fn test_overlapping_channels_keep_brightest_channel_values() {
        let red = Channel::new(&[Keyframe::new(0.0, 1.0), Keyframe::new(0.0, 1.0)], &[RED]).unwrap();
        let blue =
            Channel::new(&[Keyframe::new(0.0, 1.0), Keyframe::new(0.0, 1.0)], &[BLUE]).unwrap();
        let model = AnimationModel::new(8)
            .with_channel(red)
            .unwrap()
            .with_channel(blue)
            .unwrap();
        let frame = render(&model, 0.0);
        assert!(frame.iter().all(|pixel| *pixel == Rgb::new(255, 0, 255)));
    }

    #[test]
    fn test_active_window_interpolates_between_keyframes() {
        let keyframes = [
            Keyframe::new(0.0, 0.2),
            Keyframe::new(0.5, 0.7),
            Keyframe::new(0.8, 1.0),
        ];

        let window = active_window(&keyframes, 0.25, 10).unwrap();
        assert_close(window.start, 2.5);
        assert_close(window.end, 4.5);

        // Phase 1.0 lands on the last keyframe instead of overflowing
        let window = active_window(&keyframes, 1.0, 10).unwrap();
        assert_close(window.start, 8.0);
        assert_close(window.end, 10.0);

        assert_eq!(active_window(&[], 0.5, 10), None);
    }

    #[test]
    fn test_active_window_normalizes_reversed_keyframes() {
        let keyframes = [Keyframe::new(0.6, 0.2), Keyframe::new(0.6, 0.2)];
        let Window { start, end } = active_window(&keyframes, 0.5, 10).unwrap();
        assert_close(start, 2.0);
        assert_close(end, 6.0);
    }

    #[test]
    fn test_empty_strip_renders_nothing() {
        let model = model(0, &[(0.0, 1.0), (0.0, 1.0)], &[WHITE]);
        let mut frame: [Rgb; 0] = [];
        generate_frame(&model, 0.5, DEFAULT_GAMMA, &mut frame);
    }
}
