//! 行分类：setup / expectation / 忽略
use std::borrow::Cow;
use std::num::IntErrorKind;

use crate::options::ScanOptions;

/// 单行（已 trim）的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Setup,
    Expectation(ExpectValue<'a>),
    Ignored,
}

/// expectation 行第二字段的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectValue<'a> {
    Number(i64),
    /// 超出 i64 范围的整数：正溢出必然不合格，负溢出必然合格
    Overflow { negative: bool },
    /// 无法解析为整数（携带清理后的字段文本）
    Malformed(&'a str),
    /// 逗号分隔后不足 2 个字段
    TooFewFields,
}

impl ExpectValue<'_> {
    /// 是否低于阈值；Malformed / TooFewFields 返回 None
    pub fn below(&self, threshold: i64) -> Option<bool> {
        match self {
            ExpectValue::Number(n) => Some(*n < threshold),
            ExpectValue::Overflow { negative } => Some(*negative),
            ExpectValue::Malformed(_) | ExpectValue::TooFewFields => None,
        }
    }
}

/// 对 trim 后的行进行分类。setup 标记优先于 expectation 标记。
pub fn classify_line<'a>(line: &'a str, opts: &ScanOptions) -> LineKind<'a> {
    if line.starts_with(opts.setup_marker.as_str()) {
        LineKind::Setup
    } else if line.starts_with(opts.expect_marker.as_str()) {
        LineKind::Expectation(expect_value(line))
    } else {
        LineKind::Ignored
    }
}

/// 取逗号分隔的第二字段并解析
pub fn expect_value(line: &str) -> ExpectValue<'_> {
    let mut fields = line.split(',');
    fields.next();
    let Some(field) = fields.next() else {
        return ExpectValue::TooFewFields;
    };
    // 去掉末尾任意个 ')' 与 ';'，如 "8902);" -> "8902"
    let cleaned = field
        .trim()
        .trim_end_matches(|c: char| c == ')' || c == ';')
        .trim();
    parse_expect_field(cleaned)
}

/// Unicode 十进制数字（Nd）各区块中 0 的码位，每块连续 10 个
const DECIMAL_ZEROS: &[u32] = &[
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6, 0x0D66,
    0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90,
    0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10,
    0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650,
    0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x16A60, 0x16AC0, 0x16B50,
    0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E950, 0x1FBF0,
];

fn decimal_value(c: char) -> Option<u32> {
    let cp = c as u32;
    DECIMAL_ZEROS.iter().find(|&&zero| (zero..zero + 10).contains(&cp)).map(|&zero| cp - zero)
}

/// 将非 ASCII 的十进制数字（如 "٥"、"５"）换成 ASCII 数字，其余字符原样保留
fn ascii_digits(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }
    s.chars()
        .map(|c| match decimal_value(c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect::<String>()
        .into()
}

/// 解析整数字面量：可选符号、十进制数字（含 Unicode 十进制数字），允许数字之间的单个下划线
pub fn parse_expect_field(field: &str) -> ExpectValue<'_> {
    let ascii = ascii_digits(field);
    let Some(digits) = strip_digit_separators(&ascii) else {
        return ExpectValue::Malformed(field);
    };
    match digits.parse::<i64>() {
        Ok(n) => ExpectValue::Number(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => ExpectValue::Overflow { negative: false },
            IntErrorKind::NegOverflow => ExpectValue::Overflow { negative: true },
            _ => ExpectValue::Malformed(field),
        },
    }
}

fn strip_digit_separators(s: &str) -> Option<Cow<'_, str>> {
    if !s.contains('_') {
        return Some(Cow::Borrowed(s));
    }
    let body = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s).as_bytes();
    for (i, b) in body.iter().enumerate() {
        if *b != b'_' {
            continue;
        }
        let prev_digit = i > 0 && body[i - 1].is_ascii_digit();
        let next_digit = body.get(i + 1).is_some_and(|c| c.is_ascii_digit());
        if !prev_digit || !next_digit {
            return None;
        }
    }
    Some(Cow::Owned(s.replace('_', "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ScanOptions {
        ScanOptions::default()
    }

    #[test]
    fn classifies_setup_and_expectation_lines() {
        let o = opts();
        assert_eq!(classify_line(r#"engine.fromFen("8/8/8/8/8/8/8/8 w - - 0 1");"#, &o), LineKind::Setup);
        assert_eq!(
            classify_line("EXPECT_EQ(engine.perft(3), 8902);", &o),
            LineKind::Expectation(ExpectValue::Number(8902))
        );
        assert_eq!(classify_line("// EXPECT_EQ(x, 1);", &o), LineKind::Ignored);
        assert_eq!(classify_line("", &o), LineKind::Ignored);
    }

    #[test]
    fn single_field_is_too_few() {
        assert_eq!(expect_value("EXPECT_EQ(x);"), ExpectValue::TooFewFields);
    }

    #[test]
    fn strips_any_run_of_closing_chars() {
        assert_eq!(expect_value("EXPECT_EQ(x, 42));;"), ExpectValue::Number(42));
        assert_eq!(expect_value("EXPECT_EQ(x, 42 );"), ExpectValue::Number(42));
        assert_eq!(expect_value("EXPECT_EQ(x, 42"), ExpectValue::Number(42));
    }

    #[test]
    fn only_second_field_is_considered() {
        assert_eq!(expect_value("EXPECT_EQ(x, 7, 99);"), ExpectValue::Number(7));
    }

    #[test]
    fn parses_signs_and_separators() {
        assert_eq!(parse_expect_field("+5"), ExpectValue::Number(5));
        assert_eq!(parse_expect_field("-5"), ExpectValue::Number(-5));
        assert_eq!(parse_expect_field("1_000_000"), ExpectValue::Number(1_000_000));
        assert_eq!(parse_expect_field("1__0"), ExpectValue::Malformed("1__0"));
        assert_eq!(parse_expect_field("_10"), ExpectValue::Malformed("_10"));
        assert_eq!(parse_expect_field("10_"), ExpectValue::Malformed("10_"));
    }

    #[test]
    fn accepts_unicode_decimal_digits() {
        assert_eq!(parse_expect_field("٥"), ExpectValue::Number(5));
        assert_eq!(parse_expect_field("１２_３"), ExpectValue::Number(123));
        assert_eq!(parse_expect_field("-४२"), ExpectValue::Number(-42));
        assert_eq!(expect_value("EXPECT_EQ(x, ٥);"), ExpectValue::Number(5));
        assert_eq!(parse_expect_field("Ⅻ"), ExpectValue::Malformed("Ⅻ"));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(parse_expect_field(""), ExpectValue::Malformed(""));
        assert_eq!(parse_expect_field("depth"), ExpectValue::Malformed("depth"));
        assert_eq!(parse_expect_field("1.5"), ExpectValue::Malformed("1.5"));
        assert_eq!(expect_value("EXPECT_EQ(perft(pos, depth), 400);"), ExpectValue::Malformed("depth"));
    }

    #[test]
    fn overflow_is_classified_by_sign() {
        let big = "99999999999999999999999";
        assert_eq!(parse_expect_field(big), ExpectValue::Overflow { negative: false });
        assert_eq!(parse_expect_field("-99999999999999999999999"), ExpectValue::Overflow { negative: true });
        assert_eq!(ExpectValue::Overflow { negative: false }.below(1_000_000), Some(false));
        assert_eq!(ExpectValue::Overflow { negative: true }.below(1_000_000), Some(true));
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(ExpectValue::Number(999_999).below(1_000_000), Some(true));
        assert_eq!(ExpectValue::Number(1_000_000).below(1_000_000), Some(false));
        assert_eq!(ExpectValue::TooFewFields.below(1_000_000), None);
    }
}
