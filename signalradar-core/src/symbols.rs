//! Custom symbol input normalization.

/// Split free-form symbol text on commas and whitespace, uppercase each token,
/// drop empties and de-duplicate keeping first occurrence.
///
/// `"aapl, msft  aapl,,nvda"` becomes `["AAPL", "MSFT", "NVDA"]`.
pub fn normalize_symbols(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let symbol = token.to_uppercase();
        if !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}

/// The `tickers` query value: normalized symbols joined by commas, or `None`
/// when nothing survives normalization (the parameter is then omitted).
pub fn symbols_param(input: &str) -> Option<String> {
    let symbols = normalize_symbols(input);
    if symbols.is_empty() {
        None
    } else {
        Some(symbols.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_and_whitespace() {
        assert_eq!(normalize_symbols("aapl, msft"), vec!["AAPL", "MSFT"]);
        assert_eq!(normalize_symbols("aapl\tmsft\nnvda"), vec!["AAPL", "MSFT", "NVDA"]);
        assert_eq!(normalize_symbols(" ,, aapl ,,, "), vec!["AAPL"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        assert_eq!(
            normalize_symbols("msft aapl MSFT Aapl tsla"),
            vec!["MSFT", "AAPL", "TSLA"]
        );
    }

    #[test]
    fn empty_input_omits_param() {
        assert_eq!(symbols_param(""), None);
        assert_eq!(symbols_param("  , ,\t"), None);
    }

    #[test]
    fn param_is_comma_joined() {
        assert_eq!(symbols_param("aapl, msft").as_deref(), Some("AAPL,MSFT"));
        assert_eq!(symbols_param("brk.b").as_deref(), Some("BRK.B"));
    }
}
