// TLS termination module
// Reads key/cert PEM files fully into memory and builds the acceptor

use std::sync::Arc;

use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

use crate::error::ServerError;

/// Build a `TlsAcceptor` from PEM key/cert file paths.
///
/// Called before the listener binds; any missing or malformed material is
/// a fatal [`ServerError::Tls`], never a silent fallback to plaintext.
pub fn build_acceptor(key_path: &str, cert_path: &str) -> Result<TlsAcceptor, ServerError> {
    let cert_pem = std::fs::read(cert_path)
        .map_err(|e| ServerError::Tls(format!("cannot read certificate '{cert_path}': {e}")))?;
    let key_pem = std::fs::read(key_path)
        .map_err(|e| ServerError::Tls(format!("cannot read private key '{key_path}': {e}")))?;

    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut cert_pem.as_slice())
        .collect::<Result<_, _>>()
        .map_err(|e| ServerError::Tls(format!("invalid certificate '{cert_path}': {e}")))?;
    if certs.is_empty() {
        return Err(ServerError::Tls(format!(
            "no certificates found in '{cert_path}'"
        )));
    }

    let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut key_pem.as_slice())
        .map_err(|e| ServerError::Tls(format!("invalid private key '{key_path}': {e}")))?
        .ok_or_else(|| ServerError::Tls(format!("no private key found in '{key_path}'")))?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| ServerError::Tls(format!("TLS configuration rejected: {e}")))?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fail_fast() {
        let err = build_acceptor("/no/such/key.pem", "/no/such/cert.pem")
            .err()
            .unwrap();
        assert!(matches!(err, ServerError::Tls(_)));
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let dir = std::env::temp_dir().join(format!("statichost-tls-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let key = dir.join("key.pem");
        let cert = dir.join("cert.pem");
        std::fs::write(&key, "not a key").unwrap();
        std::fs::write(&cert, "not a cert").unwrap();

        let err = build_acceptor(key.to_str().unwrap(), cert.to_str().unwrap())
            .err()
            .unwrap();
        assert!(matches!(err, ServerError::Tls(_)));
    }
}
