// tests/common/mod.rs
//
// Markup builders for listing rows, shaped like the trade site.
#![allow(dead_code)]

pub fn row(seller: &str, qty: &str, currency: &str) -> String {
    format!(
        r#"<div class="row" data-id="x">
  <div class="left"><div class="icon"></div></div>
  <div class="right"><div class="details">
    <div class="price"><span data-field="price"><span class="price-label">Exact Price:</span><span>{qty}</span><span>×</span><span class="currency-text"><img alt="{currency}"><span>{currency}</span></span></span></div>
    <span class="profile-link"><a href="/account/view-profile/{seller}">{seller}</a></span>
    <button class="btn btn-default direct-btn">Whisper</button>
  </div></div>
</div>"#
    )
}

pub fn error_row(seller: &str) -> String {
    format!(
        r#"<div class="row"><span class="profile-link"><a>{seller}</a></span><span class="error">Failed to resolve price</span><button class="direct-btn">Whisper</button></div>"#
    )
}

pub fn rows(seller: &str, qty: &str, currency: &str, n: usize) -> String {
    (0..n).map(|_| row(seller, qty, currency)).collect()
}

pub fn page(account: &str, results: &str) -> String {
    format!(
        r#"<html><body>
<div class="loggedInStatus"><span class="profile-link"><a href="/account/view-profile/{account}">{account}</a></span></div>
<div class="results"><div class="resultset">{results}</div></div>
</body></html>"#
    )
}
