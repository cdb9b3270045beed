mod support;

mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_fan_composer::color::{BLACK, NamedColor};
    use myrtio_fan_composer::state::LightState;
    use myrtio_fan_composer::{
        CommandChannel, CommandLine, CommandOutcome, ControllerConfig, EffectId, FrameOutcome,
        FrameScheduler,
    };

    use super::support::{CaptureWriter, QUEUE, RecordingSink, TestScheduler, quiet_config};

    fn scheduler(channel: &CommandChannel<QUEUE>, config: ControllerConfig) -> TestScheduler<'_> {
        FrameScheduler::new(
            RecordingSink::default(),
            CaptureWriter::default(),
            channel.receiver(),
            config,
        )
    }

    fn send(channel: &CommandChannel<QUEUE>, line: &str) {
        let line = CommandLine::try_from(line).expect("short line");
        channel.try_send(line).expect("queue has room");
    }

    fn with_initial(initial: LightState) -> ControllerConfig {
        ControllerConfig {
            initial,
            ..quiet_config()
        }
    }

    #[test]
    fn test_start_pushes_brightness_and_banner() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.brightness = 99;
        let mut scheduler = scheduler(
            &channel,
            ControllerConfig {
                initial,
                ..ControllerConfig::default()
            },
        );
        scheduler.start();

        assert_eq!(scheduler.sink().brightness_calls, vec![99]);
        assert!(scheduler.output().text.contains("Fan LED controller"));
        assert!(scheduler.output().text.contains("G<r>,<g>,<b>"));
    }

    #[test]
    fn test_quiet_start_prints_nothing() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());
        scheduler.start();
        assert!(scheduler.output().text.is_empty());
    }

    #[test]
    fn test_telemetry_is_rate_limited() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());
        for ms in 0..500 {
            scheduler.tick(Instant::from_millis(ms));
        }
        assert_eq!(scheduler.output().telemetry_lines(), 10);
    }

    #[test]
    fn test_telemetry_line_format() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());
        scheduler.tick(Instant::from_millis(0));
        assert_eq!(
            scheduler.output().lines(),
            vec![r#"{"BR":255,"M":0,"S":10,"I":128,"SAT":255,"H":1,"R":255,"G":0,"BL":0,"TS":128}"#]
        );
    }

    #[test]
    fn test_hue_advances_on_its_own_cadence() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.hue_speed = 3;
        initial.effect = EffectId::Fire;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        scheduler.tick(Instant::from_millis(0));
        assert_eq!(scheduler.state().global_hue, 3);
        scheduler.tick(Instant::from_millis(10));
        scheduler.tick(Instant::from_millis(19));
        assert_eq!(scheduler.state().global_hue, 3);
        scheduler.tick(Instant::from_millis(20));
        assert_eq!(scheduler.state().global_hue, 6);
    }

    #[test]
    fn test_hue_counter_wraps() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.global_hue = 254;
        initial.hue_speed = 5;
        let mut scheduler = scheduler(&channel, with_initial(initial));
        scheduler.tick(Instant::from_millis(0));
        assert_eq!(scheduler.state().global_hue, 3);
    }

    #[test]
    fn test_one_command_per_tick_with_ack() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());
        send(&channel, "-");
        send(&channel, "-");

        scheduler.tick(Instant::from_millis(0));
        assert_eq!(scheduler.state().brightness, 240);
        assert!(scheduler.output().lines().contains(&"Brightness: 240"));

        scheduler.tick(Instant::from_millis(1));
        assert_eq!(scheduler.state().brightness, 225);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_brightness_is_pushed_on_change_only() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.effect = EffectId::Static;
        let mut scheduler = scheduler(&channel, with_initial(initial));
        scheduler.start();
        scheduler.tick(Instant::from_millis(0));
        scheduler.tick(Instant::from_millis(1));
        assert_eq!(scheduler.sink().brightness_calls, vec![255]);

        send(&channel, "!");
        scheduler.tick(Instant::from_millis(2));
        assert_eq!(scheduler.sink().brightness_calls, vec![255, 64]);
        assert_eq!(scheduler.sink().frame_brightness.last(), Some(&64));
    }

    #[test]
    fn test_pulse_brackets_brightness() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.effect = EffectId::Pulse;
        initial.brightness = 200;
        let mut scheduler = scheduler(&channel, with_initial(initial));
        scheduler.start();

        let result = scheduler.tick(Instant::from_millis(0));
        let FrameOutcome::Dimmed(level) = result.outcome else {
            panic!("pulse must dim, got {:?}", result.outcome);
        };
        let sink = scheduler.sink();
        assert_eq!(sink.frame_brightness, vec![level]);
        assert!(level < 200);
        assert_eq!(sink.brightness, 200);
        assert_eq!(sink.brightness_calls, vec![200, level, 200]);
    }

    #[test]
    fn test_held_frame_is_presented_after_command() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.effect = EffectId::Wipe;
        initial.speed = 200;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        let first = scheduler.tick(Instant::from_millis(0));
        assert_eq!(first.outcome, FrameOutcome::Updated);
        assert_eq!(scheduler.sink().frames.len(), 1);

        let held = scheduler.tick(Instant::from_millis(1));
        assert_eq!(held.outcome, FrameOutcome::Hold);
        assert_eq!(scheduler.sink().frames.len(), 1);

        send(&channel, ";");
        let toggled = scheduler.tick(Instant::from_millis(2));
        assert_eq!(toggled.outcome, FrameOutcome::Hold);
        assert_eq!(scheduler.sink().frames.len(), 2);

        let frame = scheduler.sink().last_frame();
        assert_eq!(frame[11], NamedColor::Red.rgb());
        assert!(frame[..11].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_auto_cycle_advances_after_period() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.speed = 100;
        initial.auto_cycle.enabled = true;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        for ms in 0..49 {
            scheduler.tick(Instant::from_millis(ms));
        }
        assert_eq!(scheduler.state().effect, EffectId::Rainbow);
        scheduler.tick(Instant::from_millis(49));
        assert_eq!(scheduler.state().effect, EffectId::Pulse);
        assert_eq!(scheduler.state().auto_cycle.ticks, 0);
    }

    #[test]
    fn test_command_restarts_auto_cycle_countdown() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.speed = 100;
        initial.auto_cycle.enabled = true;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        for ms in 0..30 {
            scheduler.tick(Instant::from_millis(ms));
        }
        send(&channel, "+");
        for ms in 30..79 {
            scheduler.tick(Instant::from_millis(ms));
        }
        assert_eq!(scheduler.state().effect, EffectId::Rainbow);
        scheduler.tick(Instant::from_millis(79));
        assert_eq!(scheduler.state().effect, EffectId::Pulse);
    }

    #[test]
    fn test_auto_cycle_wraps_to_rainbow() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.speed = 200;
        initial.effect = EffectId::Fire;
        initial.auto_cycle.enabled = true;
        initial.auto_cycle.index = 9;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        for ms in 0..25 {
            scheduler.tick(Instant::from_millis(ms));
        }
        assert_eq!(scheduler.state().effect, EffectId::Rainbow);
        assert_eq!(scheduler.state().auto_cycle.index, 0);
    }

    #[test]
    fn test_sleep_hint_follows_effect_kind() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());

        let rainbow = scheduler.tick(Instant::from_millis(0));
        assert_eq!(rainbow.sleep_duration, Duration::from_millis(10));
        assert_eq!(rainbow.next_deadline, Instant::from_millis(10));

        send(&channel, "F");
        let fire = scheduler.tick(Instant::from_millis(10));
        assert_eq!(fire.sleep_duration, Duration::from_millis(1));
    }

    #[test]
    fn test_queries_write_reports() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());

        assert!(matches!(scheduler.handle_line("I"), CommandOutcome::Query(_)));
        let text = scheduler.output_mut().take();
        assert!(text.contains("Data pin: 6\n"));
        assert!(text.contains("LED type: WS2812B\n"));
        assert!(text.contains("LED count: 12\n"));

        scheduler.handle_line("L");
        let text = scheduler.output_mut().take();
        assert!(text.contains("Effect: rainbow (0)\n"));
        assert!(text.contains("Speed: 10ms\n"));

        scheduler.handle_line("G1,2,3");
        scheduler.output_mut().take();
        scheduler.handle_line(")");
        assert_eq!(
            scheduler.output().text,
            "Current color: 1,2,3 (#010203)\n"
        );

        scheduler.output_mut().take();
        scheduler.handle_line("}");
        assert!(scheduler.output().text.contains("Range: 0-12\n"));
    }

    #[test]
    fn test_led_range_follows_strip_length() {
        let channel = CommandChannel::<QUEUE>::new();
        let mut scheduler: FrameScheduler<'_, RecordingSink, CaptureWriter, 60, QUEUE> =
            FrameScheduler::new(
                RecordingSink::default(),
                CaptureWriter::default(),
                channel.receiver(),
                ControllerConfig::default(),
            );
        assert_eq!(scheduler.state().range.end, 60);

        scheduler.handle_line("I");
        assert!(scheduler.output_mut().take().contains("LED count: 60\n"));

        scheduler.handle_line("}");
        assert!(scheduler.output_mut().take().contains("Range: 0-60\n"));

        scheduler.handle_line("(");
        scheduler.output_mut().take();
        scheduler.handle_line("}");
        assert!(scheduler.output_mut().take().contains("Range: 0-60\n"));
    }

    #[test]
    fn test_manual_effect_realigns_auto_cycle() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.speed = 100;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        send(&channel, "A");
        scheduler.tick(Instant::from_millis(0));
        send(&channel, "F");
        for ms in 1..50 {
            scheduler.tick(Instant::from_millis(ms));
        }
        assert_eq!(scheduler.state().effect, EffectId::Fire);
        scheduler.tick(Instant::from_millis(50));
        assert_eq!(scheduler.state().effect, EffectId::Rainbow);
    }

    #[test]
    fn test_ignored_line_writes_nothing() {
        let channel = CommandChannel::new();
        let mut scheduler = scheduler(&channel, quiet_config());
        assert_eq!(scheduler.handle_line("G1,2"), CommandOutcome::Ignored);
        assert!(scheduler.output().text.is_empty());
        assert_eq!(*scheduler.state(), LightState::default());
    }

    #[test]
    fn test_effect_state_survives_switching() {
        let channel = CommandChannel::new();
        let mut initial = LightState::default();
        initial.effect = EffectId::Wipe;
        let mut scheduler = scheduler(&channel, with_initial(initial));

        for ms in (0..50).step_by(10) {
            scheduler.tick(Instant::from_millis(ms));
        }
        assert_eq!(scheduler.renderer().effects().wipe.index(), 5);

        send(&channel, "S");
        scheduler.tick(Instant::from_millis(50));
        send(&channel, "W");
        scheduler.tick(Instant::from_millis(60));
        assert_eq!(scheduler.renderer().effects().wipe.index(), 6);
    }
}
