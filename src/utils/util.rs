use crate::error::TidyVcfResult;
use log;
use std::{
    fmt::{Binary, Display},
    sync::Once,
};

pub type Result<T> = TidyVcfResult<T>;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: impl Display) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}

/// Renders an integer with `,` thousands separators, e.g. `1234567` -> `1,234,567`.
pub fn format_number_with_commas<T>(n: T) -> String
where
    T: Display + Binary,
{
    let s = n.to_string();
    let (sign, digits) = s.strip_prefix('-').map_or(("", s.as_str()), |d| ("-", d));

    if digits.len() <= 3 {
        return s;
    }

    let mut grouped: Vec<char> = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (digit_count, c) in digits.chars().rev().enumerate() {
        if digit_count > 0 && digit_count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let body: String = grouped.into_iter().rev().collect();
    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_commas_small_values_untouched() {
        assert_eq!(format_number_with_commas(0u32), "0");
        assert_eq!(format_number_with_commas(999usize), "999");
        assert_eq!(format_number_with_commas(-999i64), "-999");
    }

    #[test]
    fn test_format_number_with_commas_groups_thousands() {
        assert_eq!(format_number_with_commas(1_000u32), "1,000");
        assert_eq!(format_number_with_commas(89_211usize), "89,211");
        assert_eq!(format_number_with_commas(-1_234_567i64), "-1,234,567");
        assert_eq!(
            format_number_with_commas(u64::MAX),
            "18,446,744,073,709,551,615"
        );
    }
}
