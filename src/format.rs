//! Display transforms shared by the pages: tax id masking, money and dates.

use chrono::NaiveDate;

/// Number of digits in a CPF.
pub const CPF_DIGITS: usize = 11;

/// Strip everything but ASCII digits and keep at most eleven of them.
pub fn cpf_digits(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CPF_DIGITS)
        .collect()
}

/// Apply the `###.###.###-##` mask to the digits of `input`.
///
/// Separators are only emitted in front of a digit, so partial input yields
/// a partial mask (`1234` becomes `123.4`). Already masked input comes back
/// unchanged.
pub fn mask_cpf(input: &str) -> String {
    let digits = cpf_digits(input);
    let mut masked = String::with_capacity(CPF_DIGITS + 3);

    for (i, digit) in digits.chars().enumerate() {
        match i {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(digit);
    }

    masked
}

/// Salary with a currency prefix and two fixed decimals.
pub fn format_salary(salary: f64) -> String {
    format!("R${:.2}", salary)
}

/// Canonical `yyyy-mm-dd` form.
pub fn canonical_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `dd/mm/yyyy` form used on screen.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Like [`display_date`] but tolerates a missing value.
pub fn display_optional_date(date: Option<NaiveDate>) -> String {
    date.map(display_date).unwrap_or_default()
}
