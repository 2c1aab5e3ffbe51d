//! Output formatting utilities for the CLI
//!
//! Values go to stdout unchanged so they can be consumed by scripts and
//! Zabbix itself. Discovery values are expanded into one line per bean.
//! Errors go to stderr, colored only when [`OutputStyle::color`] is set.

use std::io::{self, IsTerminal, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use zjmx_protocol::{parse_beans, BeanDescriptor, ResponseData};

/// Keys with this prefix return a discovery document instead of a value
pub const DISCOVERY_PREFIX: &str = "jmx.discovery[beans";

/// How messages are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStyle {
    pub color: bool,
}

impl OutputStyle {
    /// Colors unless disabled or stderr is not a terminal
    pub fn detect(no_color: bool) -> Self {
        Self {
            color: !no_color && io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }
}

/// Whether the key at `index` is a bean discovery request
pub fn is_discovery_key(keys: &[String], index: usize) -> bool {
    keys.get(index)
        .is_some_and(|key| key.starts_with(DISCOVERY_PREFIX))
}

/// Format a bean as `domain type object name`
pub fn format_bean(bean: &BeanDescriptor) -> String {
    format!(
        "{} {} {} {}",
        bean.domain, bean.bean_type, bean.object, bean.name
    )
}

/// Print every response entry, expanding discovery values into beans
///
/// A discovery value that fails to parse is reported on `err` and skipped;
/// the remaining entries are still printed. Returns the number of skipped
/// entries.
pub fn render_response<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    style: &OutputStyle,
    resp: &[ResponseData],
    keys: &[String],
) -> io::Result<usize> {
    let mut failed = 0;

    for (index, data) in resp.iter().enumerate() {
        if !is_discovery_key(keys, index) {
            writeln!(out, "{}", data.value)?;
            continue;
        }

        match parse_beans(&data.value) {
            Ok(beans) => {
                for bean in &beans {
                    writeln!(out, "{}", format_bean(bean))?;
                }
            }
            Err(e) => {
                failed += 1;
                write_error(err, style, &e.to_string())?;
            }
        }
    }

    Ok(failed)
}

/// Write an error message with an X prefix, red when colors are enabled
pub fn write_error<E: Write>(err: &mut E, style: &OutputStyle, msg: &str) -> io::Result<()> {
    if !style.color {
        return writeln!(err, "✗ {}", msg);
    }

    crossterm::queue!(
        err,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        Print(msg),
        ResetColor,
        Print("\n")
    )?;
    err.flush()
}

/// Print an error message to stderr
pub fn print_error(style: &OutputStyle, msg: &str) {
    let _ = write_error(&mut io::stderr().lock(), style, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEANS: &str = r#"{\"data\":[{\"{#JMXDOMAIN}\":\"java.lang\",\"{#JMXTYPE}\":\"GarbageCollector\",\"{#JMXOBJ}\":\"java.lang:type=GarbageCollector,name=G1 Young Generation\",\"{#JMXNAME}\":\"G1 Young Generation\"}]}"#;

    fn value(v: &str) -> ResponseData {
        ResponseData {
            value: v.to_string(),
        }
    }

    fn render(resp: &[ResponseData], keys: &[String]) -> (String, String, usize) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failed =
            render_response(&mut out, &mut err, &OutputStyle::plain(), resp, keys).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            failed,
        )
    }

    #[test]
    fn test_discovery_key_detection() {
        let keys = vec![
            r#"jmx.discovery[beans,"*:type=GarbageCollector,name=*"]"#.to_string(),
            r#"jmx["java.lang:type=Memory",HeapMemoryUsage.used]"#.to_string(),
            "jmx.discovery[attributes]".to_string(),
        ];

        assert!(is_discovery_key(&keys, 0));
        assert!(!is_discovery_key(&keys, 1));
        assert!(!is_discovery_key(&keys, 2));
        assert!(!is_discovery_key(&keys, 3));
    }

    #[test]
    fn test_render_plain_values() {
        let keys = vec!["jmx[a,b]".to_string(), "jmx[c,d]".to_string()];
        let (out, err, failed) = render(&[value("112.637"), value("42")], &keys);

        assert_eq!(out, "112.637\n42\n");
        assert!(err.is_empty());
        assert_eq!(failed, 0);
    }

    #[test]
    fn test_render_beans() {
        let keys = vec!["jmx.discovery[beans,\"*:type=GarbageCollector,name=*\"]".to_string()];
        let (out, _, _) = render(&[value(BEANS)], &keys);

        assert_eq!(
            out,
            "java.lang GarbageCollector java.lang:type=GarbageCollector,name=G1 Young Generation G1 Young Generation\n"
        );
    }

    #[test]
    fn test_bad_discovery_value_does_not_stop_rendering() {
        let keys = vec![
            "jmx.discovery[beans]".to_string(),
            "jmx[c,d]".to_string(),
        ];
        let (out, err, failed) = render(&[value("ABCD"), value("7")], &keys);

        assert_eq!(out, "7\n");
        assert!(err.starts_with("✗ Can't parse beans data"));
        assert_eq!(failed, 1);
    }

    #[test]
    fn test_colored_error_has_escape_codes() {
        let mut err = Vec::new();
        write_error(&mut err, &OutputStyle { color: true }, "boom").unwrap();

        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("boom"));
    }
}
