/// ANSI 顏色碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    Bright,
    Dim,
    Underscore,
    Blink,
    Reverse,
    Hidden,
    FgBlack,
    FgRed,
    FgGreen,
    FgYellow,
    FgBlue,
    FgMagenta,
    FgCyan,
    FgWhite,
    FgGray,
    BgBlack,
    BgRed,
    BgGreen,
    BgYellow,
    BgBlue,
    BgMagenta,
    BgCyan,
    BgWhite,
    BgGray,
}

impl Color {
    pub fn code(self) -> &'static str {
        match self {
            Color::Reset => "\x1b[0m",
            Color::Bright => "\x1b[1m",
            Color::Dim => "\x1b[2m",
            Color::Underscore => "\x1b[4m",
            Color::Blink => "\x1b[5m",
            Color::Reverse => "\x1b[7m",
            Color::Hidden => "\x1b[8m",
            Color::FgBlack => "\x1b[30m",
            Color::FgRed => "\x1b[31m",
            Color::FgGreen => "\x1b[32m",
            Color::FgYellow => "\x1b[33m",
            Color::FgBlue => "\x1b[34m",
            Color::FgMagenta => "\x1b[35m",
            Color::FgCyan => "\x1b[36m",
            Color::FgWhite => "\x1b[37m",
            Color::FgGray => "\x1b[90m",
            Color::BgBlack => "\x1b[40m",
            Color::BgRed => "\x1b[41m",
            Color::BgGreen => "\x1b[42m",
            Color::BgYellow => "\x1b[43m",
            Color::BgBlue => "\x1b[44m",
            Color::BgMagenta => "\x1b[45m",
            Color::BgCyan => "\x1b[46m",
            Color::BgWhite => "\x1b[47m",
            Color::BgGray => "\x1b[100m",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, color: Color, msg: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color.code(), msg, Color::Reset.code())
        } else {
            msg.to_string()
        }
    }

    pub fn pass(&self, msg: &str) -> String {
        self.paint(Color::FgGreen, msg)
    }

    pub fn fail(&self, msg: &str) -> String {
        self.paint(Color::FgRed, msg)
    }

    pub fn muted(&self, msg: &str) -> String {
        self.paint(Color::FgGray, msg)
    }
}

impl Default for Palette {
    fn default() -> Self {
        // NO_COLOR 慣例: https://no-color.org
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }
}
