//! Number formatting helpers

/// Group digits in threes: 7443 -> "7,443"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Y-axis tick label: thousands, rounded, with a `k` suffix (85000 -> "85k")
pub fn format_k_tick(value: u64) -> String {
    format!("{}k", (value as f64 / 1000.0).round() as u64)
}
