// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 规范化URL：协议与主机部分转为小写
///
/// 首尾空白会被去掉。用户信息、路径、查询串与片段按原样保留，不做任何重新编码。
/// 输入必须能被解析为绝对URL，否则返回解析错误。
pub fn normalize_url(raw: &str) -> Result<String, ParseError> {
    let raw = raw.trim();

    // Validate first; the rebuilt string below never goes through the url
    // serializer so the path keeps its original bytes.
    Url::parse(raw)?;

    let (scheme, rest) = raw
        .split_once(':')
        .ok_or(ParseError::RelativeUrlWithoutBase)?;
    let scheme = scheme.to_ascii_lowercase();

    let Some(after_slashes) = rest.strip_prefix("//") else {
        return Ok(format!("{}:{}", scheme, rest));
    };

    let authority_end = after_slashes
        .find(['/', '?', '#'])
        .unwrap_or(after_slashes.len());
    let (authority, tail) = after_slashes.split_at(authority_end);

    Ok(format!("{}://{}{}", scheme, lowercase_host(authority), tail))
}

/// 只把 authority 中的主机与端口转为小写，`user:pass@` 保持原样
fn lowercase_host(authority: &str) -> String {
    match authority.rsplit_once('@') {
        Some((userinfo, host)) => format!("{}@{}", userinfo, host.to_lowercase()),
        None => authority.to_lowercase(),
    }
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}
