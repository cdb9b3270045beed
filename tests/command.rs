mod tests {
    use myrtio_fan_composer::color::{BLACK, NamedColor, Rgb};
    use myrtio_fan_composer::command::{
        Ack, Command, CommandOutcome, Query, Setting, apply, decode, parse_number, process,
    };
    use myrtio_fan_composer::state::{LightState, RainbowStyle};
    use myrtio_fan_composer::EffectId;

    fn applied(state: &mut LightState, line: &str) -> Ack {
        match process(state, line) {
            CommandOutcome::Applied(ack) => ack,
            other => panic!("{line:?} was not applied: {other:?}"),
        }
    }

    #[test]
    fn test_brightness_steps_clamp() {
        let mut state = LightState::default();
        state.brightness = 250;
        assert_eq!(
            applied(&mut state, "+"),
            Ack::Setting(Setting::Brightness, 255)
        );
        applied(&mut state, "+");
        assert_eq!(state.brightness, 255);

        state.brightness = 20;
        applied(&mut state, "-");
        assert_eq!(state.brightness, 5);
        applied(&mut state, "-");
        applied(&mut state, "-");
        assert_eq!(state.brightness, 0);
    }

    #[test]
    fn test_brightness_presets() {
        let mut state = LightState::default();
        applied(&mut state, "!");
        assert_eq!(state.brightness, 64);
        applied(&mut state, "@");
        assert_eq!(state.brightness, 128);
    }

    #[test]
    fn test_rgb_literal() {
        let mut state = LightState::default();
        state.multi_color = true;
        let ack = applied(&mut state, "G255,0,64");
        assert_eq!(ack, Ack::CustomColor(Rgb::new(255, 0, 64)));
        assert_eq!(ack.to_string(), "Custom RGB: 255,0,64");
        assert_eq!(state.color, Rgb::new(255, 0, 64));
        assert_eq!(state.effect, EffectId::Static);
        assert!(!state.multi_color);
    }

    #[test]
    fn test_rgb_literal_clamps_each_channel() {
        let mut state = LightState::default();
        applied(&mut state, "g300,-5, 12");
        assert_eq!(state.color, Rgb::new(255, 0, 12));

        applied(&mut state, "G99999999999999999999,0,-99999999999999999999");
        assert_eq!(state.color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_malformed_rgb_is_ignored() {
        for line in ["G1,2", "G1,2,3,4", "G1;2;3", "Gx,1,2", "G,,", "G1,,3"] {
            let mut state = LightState::default();
            let before = state.clone();
            assert_eq!(process(&mut state, line), CommandOutcome::Ignored, "{line}");
            assert_eq!(state, before, "{line}");
        }
    }

    #[test]
    fn test_numeric_settings_clamp_to_range() {
        let mut state = LightState::default();
        applied(&mut state, "~B200");
        assert_eq!(state.brightness, 200);
        applied(&mut state, "~V0");
        assert_eq!(state.speed, 1);
        applied(&mut state, "~v999");
        assert_eq!(state.speed, 200);
        applied(&mut state, "~H9");
        assert_eq!(state.hue_speed, 5);
        applied(&mut state, "~T10");
        assert_eq!(state.tipsy_scale, 32);
        applied(&mut state, "~I-4");
        assert_eq!(state.intensity, 0);
        applied(&mut state, "~U77");
        assert_eq!(state.saturation, 77);
    }

    #[test]
    fn test_malformed_settings_are_ignored() {
        for line in ["~Q5", "~B", "~Babc", "~", "~5"] {
            let mut state = LightState::default();
            assert_eq!(process(&mut state, line), CommandOutcome::Ignored, "{line}");
            assert_eq!(state, LightState::default(), "{line}");
        }
    }

    #[test]
    fn test_unknown_input_is_ignored() {
        let mut state = LightState::default();
        for line in ["", "   ", "?", "hello", "`"] {
            assert_eq!(process(&mut state, line), CommandOutcome::Ignored, "{line:?}");
        }
        assert_eq!(state, LightState::default());
    }

    #[test]
    fn test_named_color_switches_to_static() {
        let mut state = LightState::default();
        state.multi_color = true;
        assert_eq!(applied(&mut state, "8"), Ack::Color(NamedColor::Orange));
        assert_eq!(state.color, Rgb::new(255, 165, 0));
        assert_eq!(state.effect, EffectId::Static);
        assert!(!state.multi_color);
    }

    #[test]
    fn test_effect_letters() {
        let mut state = LightState::default();
        let ack = applied(&mut state, "f");
        assert_eq!(ack.to_string(), "Effect: fire");
        assert_eq!(state.effect, EffectId::Fire);

        applied(&mut state, "J");
        assert_eq!(state.effect, EffectId::MultiColor);
        assert!(state.multi_color);

        // Other effects keep the multi-color flag as it is
        applied(&mut state, "K");
        assert!(state.multi_color);
    }

    #[test]
    fn test_speed_steps_and_presets() {
        let mut state = LightState::default();
        assert_eq!(applied(&mut state, ">").to_string(), "Speed: 15ms");
        applied(&mut state, "<");
        applied(&mut state, "<");
        assert_eq!(state.speed, 5);
        applied(&mut state, "<");
        assert_eq!(state.speed, 1);

        for (line, speed) in [("Q", 5), ("d", 15), ("V", 30), ("z", 50), ("M", 100)] {
            applied(&mut state, line);
            assert_eq!(state.speed, speed, "{line}");
        }
    }

    #[test]
    fn test_intensity_saturation_hue_steps() {
        let mut state = LightState::default();
        applied(&mut state, "$");
        assert_eq!(state.intensity, 158);
        applied(&mut state, "#");
        applied(&mut state, "#");
        assert_eq!(state.intensity, 98);

        applied(&mut state, "^");
        assert_eq!(state.saturation, 255);
        applied(&mut state, "%");
        assert_eq!(state.saturation, 225);

        applied(&mut state, "&");
        assert_eq!(state.hue_speed, 1);
        for _ in 0..10 {
            applied(&mut state, "*");
        }
        assert_eq!(state.hue_speed, 5);
    }

    #[test]
    fn test_toggles_flip_back() {
        let mut state = LightState::default();
        assert_eq!(applied(&mut state, ";"), Ack::Reverse(true));
        assert_eq!(applied(&mut state, ";"), Ack::Reverse(false));
        assert_eq!(applied(&mut state, "'"), Ack::Mirror(true));
        assert_eq!(applied(&mut state, "["), Ack::WaveDirection(true));
        assert_eq!(Ack::Mirror(true).to_string(), "Mirror: ON");
    }

    #[test]
    fn test_rainbow_style_cycles_through_four() {
        let mut state = LightState::default();
        assert_eq!(
            applied(&mut state, "]"),
            Ack::RainbowStyle(RainbowStyle::HueOnly)
        );
        applied(&mut state, "]");
        applied(&mut state, "]");
        applied(&mut state, "]");
        assert_eq!(state.rainbow_style, RainbowStyle::Wavelength);
    }

    #[test]
    fn test_auto_cycle_toggle_resumes_from_current_effect() {
        let mut state = LightState::default();
        applied(&mut state, "C");
        assert_eq!(applied(&mut state, "a"), Ack::AutoCycle(true));
        assert!(state.auto_cycle.enabled);
        assert_eq!(state.auto_cycle.index, EffectId::Confetti.raw());

        applied(&mut state, "A");
        applied(&mut state, "Y");
        applied(&mut state, "A");
        assert_eq!(
            EffectId::auto_cycle_after(state.auto_cycle.index).1,
            EffectId::Rainbow
        );
    }

    #[test]
    fn test_manual_effect_choice_moves_auto_cycle_along() {
        let mut state = LightState::default();
        applied(&mut state, "A");
        assert_eq!(state.auto_cycle.index, EffectId::Rainbow.raw());

        applied(&mut state, "C");
        assert_eq!(state.auto_cycle.index, EffectId::Confetti.raw());
        assert_eq!(
            EffectId::auto_cycle_after(state.auto_cycle.index).1,
            EffectId::Fire
        );

        applied(&mut state, "F");
        assert_eq!(
            EffectId::auto_cycle_after(state.auto_cycle.index).1,
            EffectId::Rainbow
        );

        // Turned off, the rotation index is left alone
        applied(&mut state, "A");
        applied(&mut state, "C");
        assert_eq!(state.auto_cycle.index, EffectId::Fire.raw());
    }

    #[test]
    fn test_mutations_restart_auto_cycle_countdown() {
        let mut state = LightState::default();
        state.auto_cycle.enabled = true;
        state.auto_cycle.ticks = 321;
        process(&mut state, "+");
        assert_eq!(state.auto_cycle.ticks, 0);
        assert!(state.auto_cycle.enabled);

        state.auto_cycle.ticks = 7;
        process(&mut state, "L");
        assert_eq!(state.auto_cycle.ticks, 7);
        process(&mut state, "?");
        assert_eq!(state.auto_cycle.ticks, 7);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut state = LightState::default();
        applied(&mut state, "~B10");
        applied(&mut state, "J");
        applied(&mut state, ";");
        assert_eq!(applied(&mut state, "("), Ack::Reset);
        assert_eq!(state, LightState::default());

        assert_eq!(applied(&mut state, "{"), Ack::Cleared);
        assert_eq!(state.color, BLACK);
        assert_eq!(state.effect, EffectId::Static);
        assert!(!state.multi_color);
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut state = LightState::default();
        for (line, query) in [
            ("L", Query::Status),
            ("i", Query::PinInfo),
            (")", Query::CustomColor),
            ("}", Query::LedSettings),
        ] {
            assert_eq!(process(&mut state, line), CommandOutcome::Query(query));
        }
        assert_eq!(state, LightState::default());
    }

    #[test]
    fn test_decode_then_apply() {
        assert_eq!(
            decode(" ~t200 "),
            Some(Command::Set(Setting::TipsyScale, 200))
        );
        let mut state = LightState::default();
        let outcome = apply(&mut state, Command::Adjust(Setting::Brightness, -300));
        assert_eq!(
            outcome,
            CommandOutcome::Applied(Ack::Setting(Setting::Brightness, 0))
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number(" +12 "), Some(12));
        assert_eq!(parse_number("-7"), Some(-7));
        assert_eq!(parse_number("0007"), Some(7));
        assert_eq!(parse_number("123456789012345678901234"), Some(i32::MAX));
        assert_eq!(parse_number("-123456789012345678901234"), Some(i32::MIN));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("1a"), None);
        assert_eq!(parse_number("1 2"), None);
    }

    #[test]
    fn test_rgb_examples_from_protocol() {
        let mut state = LightState::default();
        applied(&mut state, "G255,128,64");
        assert_eq!(state.color, Rgb::new(255, 128, 64));
        applied(&mut state, "G999,-5,64");
        assert_eq!(state.color, Rgb::new(255, 0, 64));
    }

    #[test]
    fn test_brightness_setting_out_of_range() {
        let mut state = LightState::default();
        assert_eq!(
            applied(&mut state, "~B-20"),
            Ack::Setting(Setting::Brightness, 0)
        );
        assert_eq!(
            applied(&mut state, "~B4000"),
            Ack::Setting(Setting::Brightness, 255)
        );
    }
}
