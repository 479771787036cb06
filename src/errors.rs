//! 统一错误处理模块
//!
//! 使用宏生成错误类型，每个变体携带错误代码与类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 生成内容：
/// - enum 定义
/// - code() / error_type() / message() 访问方法
/// - snake_case 便捷构造函数
macro_rules! define_quizroom_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum QuizRoomError {
            $($variant(String),)*
        }

        impl QuizRoomError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(QuizRoomError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(QuizRoomError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(QuizRoomError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl QuizRoomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        QuizRoomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_quizroom_errors! {
    CacheConnection("Q001", "Cache Connection Error"),
    CachePluginNotFound("Q002", "Cache Plugin Not Found"),
    DatabaseConfig("Q003", "Database Configuration Error"),
    DatabaseConnection("Q004", "Database Connection Error"),
    DatabaseOperation("Q005", "Database Operation Error"),
    FileOperation("Q006", "File Operation Error"),
    Validation("Q007", "Validation Error"),
    NotFoundOrDenied("Q008", "Resource Not Found Or Access Denied"),
    Serialization("Q009", "Serialization Error"),
    DateParse("Q010", "Date Parse Error"),
    Authentication("Q011", "Authentication Error"),
    RoleLookup("Q012", "Role Lookup Error"),
    ImageDecode("Q013", "Image Decode Error"),
    ImageEncode("Q014", "Image Encode Error"),
    ObjectStorage("Q015", "Object Storage Error"),
}

impl QuizRoomError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QuizRoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QuizRoomError {}

impl From<sea_orm::DbErr> for QuizRoomError {
    fn from(err: sea_orm::DbErr) -> Self {
        QuizRoomError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for QuizRoomError {
    fn from(err: std::io::Error) -> Self {
        QuizRoomError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for QuizRoomError {
    fn from(err: serde_json::Error) -> Self {
        QuizRoomError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for QuizRoomError {
    fn from(err: chrono::ParseError) -> Self {
        QuizRoomError::DateParse(err.to_string())
    }
}

impl From<image::ImageError> for QuizRoomError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Encoding(e) => QuizRoomError::ImageEncode(e.to_string()),
            other => QuizRoomError::ImageDecode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizRoomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(QuizRoomError::cache_connection("test").code(), "Q001");
        assert_eq!(QuizRoomError::validation("test").code(), "Q007");
        assert_eq!(QuizRoomError::not_found_or_denied("test").code(), "Q008");
        assert_eq!(QuizRoomError::image_decode("test").code(), "Q013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            QuizRoomError::role_lookup("test").error_type(),
            "Role Lookup Error"
        );
        assert_eq!(
            QuizRoomError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = QuizRoomError::validation("Session name is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Session name is required"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: QuizRoomError = io.into();
        assert_eq!(err.code(), "Q006");
        assert_eq!(err.message(), "missing");
    }
}
