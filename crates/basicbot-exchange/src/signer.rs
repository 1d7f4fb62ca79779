//! HMAC-SHA256 요청 서명.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 메시지를 HMAC-SHA256으로 서명하고 소문자 hex 문자열을 반환합니다.
///
/// 같은 입력이면 항상 같은 결과를 냅니다.
pub fn sign(secret: &[u8], message: &[u8]) -> String {
    // HMAC은 임의 길이 키를 허용하므로 실패하지 않음
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        let secret = b"NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            sign(secret, query.as_bytes()),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign(b"secret", b"symbol=BTCUSDT&timestamp=1");
        let second = sign(b"secret", b"symbol=BTCUSDT&timestamp=1");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_depends_on_key_and_message() {
        let base = sign(b"secret", b"symbol=BTCUSDT");
        assert_ne!(base, sign(b"other", b"symbol=BTCUSDT"));
        assert_ne!(base, sign(b"secret", b"symbol=ETHUSDT"));
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(sign(b"", b"message").len(), 64);
    }
}
