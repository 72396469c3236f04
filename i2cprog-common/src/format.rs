//! Per-byte console rendering

/// How each transferred byte is echoed to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raw character
    Ascii,
    /// Zero-padded decimal
    Decimal,
    /// Zero-padded hexadecimal with `0x` prefix
    #[default]
    Hex,
}

impl OutputFormat {
    /// Single-letter code used on the command line
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            Self::Ascii => 'a',
            Self::Decimal => 'd',
            Self::Hex => 'h',
        }
    }

    /// Parse a format code, falling back to hex for anything unrecognized
    ///
    /// Use [`crate::validators::validate_format`] when an unknown code should
    /// be rejected instead.
    #[must_use]
    pub fn from_code(code: char) -> Self {
        match code {
            'a' => Self::Ascii,
            'd' => Self::Decimal,
            _ => Self::Hex,
        }
    }

    /// Render one byte at `offset` as a newline-terminated report line
    ///
    /// Ascii writes the byte itself, unmodified: values above 0x7f are not
    /// re-encoded, so the line is not necessarily valid UTF-8.
    #[must_use]
    pub fn render_line(&self, offset: u64, byte: u8) -> Vec<u8> {
        let mut line = format!("0x{:06x}: ", offset).into_bytes();
        match self {
            Self::Ascii => line.push(byte),
            Self::Decimal => line.extend_from_slice(format!("{:02}", byte).as_bytes()),
            Self::Hex => line.extend_from_slice(format!("0x{:02x}", byte).as_bytes()),
        }
        line.push(b'\n');
        line
    }
}
