/// Log tags identifying the subsystem a message comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Trader,
    Telegram,
    Database,
    Blacklist,
    Dashboard,
}

impl LogTag {
    /// Every tag, in display order
    pub const ALL: [LogTag; 8] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Api,
        LogTag::Trader,
        LogTag::Telegram,
        LogTag::Database,
        LogTag::Blacklist,
        LogTag::Dashboard,
    ];

    /// Key used by the --debug-<key> flags
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Api => "api",
            LogTag::Trader => "trader",
            LogTag::Telegram => "telegram",
            LogTag::Database => "database",
            LogTag::Blacklist => "blacklist",
            LogTag::Dashboard => "dashboard",
        }
    }

    /// Uncolored label used in log files
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Api => "API",
            LogTag::Trader => "TRADER",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Database => "DATABASE",
            LogTag::Blacklist => "BLACKLIST",
            LogTag::Dashboard => "DASHBOARD",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_plain_string())
    }
}
