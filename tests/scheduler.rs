mod tests {
    use embassy_time::{Duration, Instant};
    use keyframe_composer::color::{BLACK, DEFAULT_GAMMA, Rgb, scale_rgb};
    use keyframe_composer::config::{ConfigMessage, ConfigUpdater, PatchMailbox};
    use keyframe_composer::frame::generate_frame;
    use keyframe_composer::frame_scheduler::{FrameScheduler, Player};
    use keyframe_composer::model::AnimationModel;
    use keyframe_composer::renderer::{Renderer, RendererConfig};
    use keyframe_composer::timeline::{CycleTiming, MAX_PHASE};
    use keyframe_composer::{OutputDriver, presets};

    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    struct RecordingDriver {
        pixels: [Rgb; 32],
        pixel_writes: usize,
        flushes: usize,
    }

    impl RecordingDriver {
        fn new() -> Self {
            Self {
                pixels: [BLACK; 32],
                pixel_writes: 0,
                flushes: 0,
            }
        }
    }

    impl OutputDriver for RecordingDriver {
        fn set_pixel(&mut self, index: usize, color: Rgb) {
            self.pixels[index] = color;
            self.pixel_writes += 1;
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    fn reference_frame(model: &AnimationModel, now: Instant) -> Vec<Rgb> {
        let mut frame = vec![BLACK; model.strip_length()];
        generate_frame(model, model.timing().phase_at(now), DEFAULT_GAMMA, &mut frame);
        frame
    }

    #[test]
    fn test_phase_with_hold() {
        let timing = CycleTiming::new(1000, 500);
        assert_eq!(timing.period_ms(), 1500);
        assert_eq!(timing.phase_at_millis(0), 0.0);
        assert_eq!(timing.phase_at_millis(250), 0.25);
        assert_eq!(timing.phase_at_millis(999), 0.999);
        // Hold freezes at the seam
        assert_eq!(timing.phase_at_millis(1000), 0.0);
        assert_eq!(timing.phase_at_millis(1499), 0.0);
        // Next cycle
        assert_eq!(timing.phase_at_millis(1500), 0.0);
        assert_eq!(timing.phase_at_millis(1750), 0.25);
        assert_eq!(timing.phase_at(Instant::from_millis(3250)), 0.25);
    }

    #[test]
    fn test_phase_without_hold() {
        let timing = CycleTiming::new(1000, 0);
        assert_eq!(timing.phase_at_millis(1500), 0.5);
        assert!(timing.phase_at_millis(u64::MAX) < 1.0);
    }

    #[test]
    fn test_phase_degenerate_timing() {
        assert_eq!(CycleTiming::new(0, 0).phase_at_millis(1234), 0.0);
        assert_eq!(CycleTiming::new(0, 500).phase_at_millis(1234), 0.0);
        assert!(MAX_PHASE < 1.0);
    }

    #[test]
    fn test_renderer_clamps_brightness_above_one() {
        let mailbox: PatchMailbox<4> = PatchMailbox::new();
        let model = presets::sweep(18).unwrap();
        let mut renderer: Renderer<'_, 32, 4> =
            Renderer::new(mailbox.receiver(), model, &RendererConfig::default());

        let updater = ConfigUpdater::new(mailbox.sender(), 1);
        let message = ConfigMessage {
            brightness: Some(2.5),
            ..Default::default()
        };
        updater.submit(&message).unwrap();

        let now = Instant::from_millis(150);
        let frame = renderer.render(now).unwrap().to_vec();
        assert_eq!(renderer.model().brightness(), 2.5);
        assert_eq!(frame, reference_frame(renderer.model(), now));
        assert!(frame.iter().any(|pixel| *pixel != BLACK));
    }

    #[test]
    fn test_renderer_scales_by_brightness() {
        let mailbox: PatchMailbox<4> = PatchMailbox::new();
        let model = presets::sweep(18).unwrap().with_brightness(0.5);
        let mut renderer: Renderer<'_, 32, 4> =
            Renderer::new(mailbox.receiver(), model, &RendererConfig::default());

        let now = Instant::from_millis(150);
        let expected: Vec<Rgb> = reference_frame(renderer.model(), now)
            .into_iter()
            .map(|pixel| scale_rgb(pixel, 0.5))
            .collect();
        assert_eq!(renderer.render(now).unwrap(), expected.as_slice());
    }

    #[test]
    fn test_renderer_applies_queued_patch_before_drawing() {
        let mailbox: PatchMailbox<4> = PatchMailbox::new();
        let model = presets::teal_bar(18).unwrap().with_brightness(1.0);
        let mut renderer: Renderer<'_, 32, 4> =
            Renderer::new(mailbox.receiver(), model, &RendererConfig::default());
        let updater = ConfigUpdater::new(mailbox.sender(), renderer.model().channel_count());

        let key_frame: &[&[f32]] = &[&[0.0, 1.0], &[0.0, 1.0]];
        let message = ConfigMessage {
            key_frame: Some(key_frame),
            color: Some(&["ffffff"]),
            ..Default::default()
        };
        updater.submit(&message).unwrap();

        let frame = renderer.render(Instant::from_millis(0)).unwrap();
        assert!(frame.iter().all(|pixel| *pixel == WHITE));
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_renderer_limits_strip_to_capacity() {
        let mailbox: PatchMailbox<1> = PatchMailbox::new();
        let model = presets::sweep(64).unwrap();
        let mut renderer: Renderer<'_, 32, 1> =
            Renderer::new(mailbox.receiver(), model, &RendererConfig::default());
        assert_eq!(renderer.model().strip_length(), 32);
        assert_eq!(renderer.render(Instant::from_millis(0)).unwrap().len(), 32);
    }

    #[test]
    fn test_frame_length_matches_strip_length() {
        let mailbox: PatchMailbox<1> = PatchMailbox::new();
        let mut renderer: Renderer<'_, 32, 1> = Renderer::new(
            mailbox.receiver(),
            presets::sweep(18).unwrap(),
            &RendererConfig::default(),
        );
        for millis in (0..2600).step_by(7) {
            let frame = renderer.render(Instant::from_millis(millis)).unwrap();
            assert_eq!(frame.len(), 18);
        }
    }

    #[test]
    fn test_player_skips_degenerate_targets() {
        let mailbox: PatchMailbox<1> = PatchMailbox::new();
        let renderer: Renderer<'_, 32, 1> = Renderer::new(
            mailbox.receiver(),
            AnimationModel::new(18),
            &RendererConfig::default(),
        );
        let mut player = Player::new(renderer, RecordingDriver::new());
        assert!(!player.play(Instant::from_millis(0)));
        assert_eq!(player.output().flushes, 0);

        let renderer: Renderer<'_, 32, 1> = Renderer::new(
            mailbox.receiver(),
            presets::sweep(0).unwrap(),
            &RendererConfig::default(),
        );
        let mut player = Player::new(renderer, RecordingDriver::new());
        assert!(!player.play(Instant::from_millis(0)));
        assert_eq!(player.output().pixel_writes, 0);
    }

    #[test]
    fn test_player_writes_every_pixel_then_flushes() {
        let mailbox: PatchMailbox<1> = PatchMailbox::new();
        let model = presets::sweep(18).unwrap();
        let now = Instant::from_millis(150);
        let expected: Vec<Rgb> = reference_frame(&model, now)
            .into_iter()
            .map(|pixel| scale_rgb(pixel, 0.2))
            .collect();

        let renderer: Renderer<'_, 32, 1> =
            Renderer::new(mailbox.receiver(), model, &RendererConfig::default());
        let mut player = Player::new(renderer, RecordingDriver::new());
        assert!(player.play(now));
        assert_eq!(player.output().pixel_writes, 18);
        assert_eq!(player.output().flushes, 1);
        assert_eq!(&player.output().pixels[..18], expected.as_slice());
    }

    #[test]
    fn test_frame_scheduler_paces_all_targets() {
        let front_mailbox: PatchMailbox<1> = PatchMailbox::new();
        let back_mailbox: PatchMailbox<1> = PatchMailbox::new();
        let front: Renderer<'_, 32, 1> = Renderer::new(
            front_mailbox.receiver(),
            presets::sweep(18).unwrap(),
            &RendererConfig::default(),
        );
        let back: Renderer<'_, 32, 1> = Renderer::new(
            back_mailbox.receiver(),
            presets::teal_bar(18).unwrap(),
            &RendererConfig::default(),
        );
        let mut scheduler = FrameScheduler::with_frame_duration(
            [
                Player::new(front, RecordingDriver::new()),
                Player::new(back, RecordingDriver::new()),
            ],
            Duration::from_millis(20),
        );

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(20));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));

        let result = scheduler.tick(Instant::from_millis(25));
        assert_eq!(result.next_deadline, Instant::from_millis(40));
        assert_eq!(result.sleep_duration, Duration::from_millis(15));

        // More than two frames behind: the backlog is dropped
        let result = scheduler.tick(Instant::from_millis(500));
        assert_eq!(result.next_deadline, Instant::from_millis(520));

        for player in scheduler.players() {
            assert_eq!(player.output().flushes, 3);
        }
    }
}
