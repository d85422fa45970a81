// Display formatting for prices and mileage

/// Group digits in threes: 12345678 -> "12,345,678"
pub fn grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

/// Whole-dollar price for grids: "$25,000"
pub fn usd_whole(value: i64) -> String {
    format!("${}", grouped(value))
}

/// Currency price for detail pages: "$25,000.00"
pub fn usd(value: i64) -> String {
    format!("${}.00", grouped(value))
}
