//! 错误类型
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// EXPECT_EQ 行的第二字段不是合法整数
    #[error("line {line_no}: malformed expectation value {field:?} in {line:?}")]
    MalformedExpectationValue {
        line_no: usize,
        field: String,
        line: String,
    },

    #[error("read input failed")]
    Io(#[from] std::io::Error),
}
