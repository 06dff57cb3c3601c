//! Coloured one-line status messages

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Failure,
    Info,
}

impl StatusKind {
    fn color(self) -> Option<Color> {
        match self {
            StatusKind::Success => Some(Color::Green),
            StatusKind::Warning => Some(Color::Yellow),
            StatusKind::Failure => Some(Color::Red),
            StatusKind::Info => None,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            StatusKind::Success => "✔",
            StatusKind::Warning => "!",
            StatusKind::Failure => "✘",
            StatusKind::Info => "·",
        }
    }
}

/// Write a status line to any colour-capable writer
pub fn write_status(writer: &mut dyn WriteColor, kind: StatusKind, message: &str) -> std::io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(kind.color()).set_bold(kind != StatusKind::Info))?;
    write!(writer, "{}", kind.marker())?;
    writer.reset()?;
    writeln!(writer, " {}", message)
}

/// Print a status line to stdout, ignoring terminal write errors
pub fn print_status(kind: StatusKind, message: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = write_status(&mut stdout, kind, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn test_write_status_plain() {
        let mut out = NoColor::new(Vec::new());
        write_status(&mut out, StatusKind::Warning, "no matching columns").unwrap();
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "! no matching columns\n"
        );
    }
}
