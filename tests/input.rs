mod support;

mod tests {
    use myrtio_fan_composer::channel::COMMAND_LINE_CAPACITY;
    use myrtio_fan_composer::{CommandChannel, Error, LineReader};

    use super::support::{ByteSource, QUEUE};

    fn push_all(reader: &mut LineReader, bytes: &[u8]) -> Vec<String> {
        bytes
            .iter()
            .filter_map(|byte| reader.push(*byte))
            .map(|line| line.as_str().to_owned())
            .collect()
    }

    #[test]
    fn test_line_terminators() {
        let mut reader = LineReader::new();
        assert_eq!(
            push_all(&mut reader, b"R\nP\r\nS\r"),
            vec!["R", "P", "S"]
        );
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_skipped() {
        let mut reader = LineReader::new();
        assert_eq!(
            push_all(&mut reader, b"\r\n  G1,2,3 \n\n\t\n"),
            vec!["G1,2,3"]
        );
    }

    #[test]
    fn test_partial_line_waits_for_terminator() {
        let mut reader = LineReader::new();
        assert!(push_all(&mut reader, b"~B1").is_empty());
        assert_eq!(push_all(&mut reader, b"28\n"), vec!["~B128"]);
    }

    #[test]
    fn test_overlong_line_is_dropped_whole() {
        let mut reader = LineReader::new();
        let mut bytes = vec![b'G'; COMMAND_LINE_CAPACITY + 8];
        bytes.extend_from_slice(b"\nL\n");
        assert_eq!(push_all(&mut reader, &bytes), vec!["L"]);
    }

    #[test]
    fn test_line_at_capacity_is_kept() {
        let mut reader = LineReader::new();
        let mut bytes = vec![b'1'; COMMAND_LINE_CAPACITY];
        bytes.push(b'\n');
        let lines = push_all(&mut reader, &bytes);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), COMMAND_LINE_CAPACITY);
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let mut reader = LineReader::new();
        assert_eq!(push_all(&mut reader, b"\xff\xfe\nR\n"), vec!["R"]);
    }

    #[test]
    fn test_poll_queues_complete_lines() {
        let channel: CommandChannel<QUEUE> = CommandChannel::new();
        let sender = channel.sender();
        let mut reader = LineReader::new();
        let mut source = ByteSource::new(b"F\r\n~V50\nJ");

        assert_eq!(reader.poll(&mut source, &sender), Ok(2));
        assert_eq!(channel.try_receive().as_deref(), Some("F"));
        assert_eq!(channel.try_receive().as_deref(), Some("~V50"));
        assert!(channel.is_empty());

        source.feed(b"\n");
        assert_eq!(reader.poll(&mut source, &sender), Ok(1));
        assert_eq!(channel.try_receive().as_deref(), Some("J"));
    }

    #[test]
    fn test_poll_reports_full_queue() {
        let channel: CommandChannel<QUEUE> = CommandChannel::new();
        let sender = channel.sender();
        let mut reader = LineReader::new();
        let mut source = ByteSource::new(b"1\n2\n3\n4\n5\n6\n");

        assert!(matches!(
            reader.poll(&mut source, &sender),
            Err(Error::QueueFull)
        ));
        assert_eq!(channel.len(), QUEUE);
        assert_eq!(channel.try_receive().as_deref(), Some("1"));
    }
}
