use percent_encoding::percent_decode_str;

pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("请输入用户名".into());
    }
    if password.is_empty() {
        return Err("请输入密码".into());
    }
    Ok(())
}

/// Pulls the `redirect` parameter out of a raw query string.
pub fn redirect_from_search(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "redirect" {
            return None;
        }
        percent_decode_str(value)
            .decode_utf8()
            .ok()
            .map(|decoded| decoded.into_owned())
    })
}
