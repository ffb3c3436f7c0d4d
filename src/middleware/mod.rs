/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer 認証 (RequestContext の確立)
 * - cors / http / security_headers: 横断的な HTTP 層
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
