/// Controls how a [`MessageSink`](crate::MessageSink) terminates each entry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append `\n` after each entry.
    #[default]
    WithNewline,
    /// Append `\r\n` after each entry, as persisted log files do.
    WithCrlf,
    /// Emit the entry without a terminator.
    WithoutNewline,
}

impl LineMode {
    /// Returns the bytes written after each entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert_eq!(LineMode::WithNewline.terminator(), b"\n");
    /// assert_eq!(LineMode::WithCrlf.terminator(), b"\r\n");
    /// assert!(LineMode::WithoutNewline.terminator().is_empty());
    /// ```
    #[must_use]
    pub const fn terminator(self) -> &'static [u8] {
        match self {
            Self::WithNewline => b"\n",
            Self::WithCrlf => b"\r\n",
            Self::WithoutNewline => b"",
        }
    }
}
