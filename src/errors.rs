use std::fmt;

#[derive(Debug, Clone)]
pub enum VenueError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Serialization(String),
    DateParse(String),
    Import(String),
}

impl VenueError {
    /// (错误码, 类型名, HTTP 状态码)
    fn meta(&self) -> (&'static str, &'static str, u16) {
        use VenueError::*;
        match self {
            DatabaseConfig(_) => ("E001", "Database Configuration Error", 500),
            DatabaseConnection(_) => ("E002", "Database Connection Error", 503),
            DatabaseOperation(_) => ("E003", "Database Operation Error", 500),
            FileOperation(_) => ("E004", "File Operation Error", 500),
            Validation(_) => ("E005", "Validation Error", 400),
            NotFound(_) => ("E006", "Resource Not Found", 404),
            Conflict(_) => ("E007", "Conflict", 409),
            Serialization(_) => ("E008", "Serialization Error", 500),
            DateParse(_) => ("E009", "Date Parse Error", 400),
            Import(_) => ("E010", "Import Error", 422),
        }
    }

    pub fn code(&self) -> &'static str {
        self.meta().0
    }

    pub fn error_type(&self) -> &'static str {
        self.meta().1
    }

    pub fn http_status(&self) -> u16 {
        self.meta().2
    }

    pub fn message(&self) -> &str {
        use VenueError::*;
        match self {
            DatabaseConfig(msg) | DatabaseConnection(msg) | DatabaseOperation(msg)
            | FileOperation(msg) | Validation(msg) | NotFound(msg) | Conflict(msg)
            | Serialization(msg) | DateParse(msg) | Import(msg) => msg,
        }
    }

    /// 由请求本身引起的错误，消息可以原样返回给客户端
    pub fn is_operational(&self) -> bool {
        (400..500).contains(&self.http_status())
    }

    /// CLI 模式下的彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for VenueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_simple())
    }
}

impl std::error::Error for VenueError {}

macro_rules! constructors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        impl VenueError {
            $(
                pub fn $name<T: Into<String>>(msg: T) -> Self {
                    VenueError::$variant(msg.into())
                }
            )*
        }
    };
}

constructors! {
    database_config => DatabaseConfig,
    database_connection => DatabaseConnection,
    database_operation => DatabaseOperation,
    file_operation => FileOperation,
    validation => Validation,
    not_found => NotFound,
    conflict => Conflict,
    serialization => Serialization,
    date_parse => DateParse,
    import => Import,
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for VenueError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::Conn(e) => VenueError::DatabaseConnection(e.to_string()),
            other => VenueError::DatabaseOperation(other.to_string()),
        }
    }
}

impl From<std::io::Error> for VenueError {
    fn from(err: std::io::Error) -> Self {
        VenueError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for VenueError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            VenueError::FileOperation(err.to_string())
        } else {
            VenueError::Import(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VenueError {
    fn from(err: serde_json::Error) -> Self {
        VenueError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for VenueError {
    fn from(err: chrono::ParseError) -> Self {
        VenueError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VenueError>;
