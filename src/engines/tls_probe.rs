// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{ProbeError, TlsProbe};
use async_trait::async_trait;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{self, WebPkiSupportedAlgorithms};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// 只记录证书是否出示的校验器
///
/// 证书链不做信任校验，但握手签名仍按提供者算法验证
#[derive(Debug)]
struct PresenceOnlyVerifier {
    algorithms: WebPkiSupportedAlgorithms,
}

impl ServerCertVerifier for PresenceOnlyVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        crypto::verify_tls12_signature(message, cert, dss, &self.algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        crypto::verify_tls13_signature(message, cert, dss, &self.algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.algorithms.supported_schemes()
    }
}

/// 基于rustls的TLS探测
pub struct RustlsTlsProbe {
    connector: TlsConnector,
    port: u16,
}

impl RustlsTlsProbe {
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_port(443)
    }

    /// 指定目标端口（测试用）
    pub fn with_port(port: u16) -> Result<Self, ProbeError> {
        let provider = Arc::new(crypto::ring::default_provider());
        let verifier = PresenceOnlyVerifier {
            algorithms: provider.signature_verification_algorithms,
        };

        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifier))
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            port,
        })
    }
}

#[async_trait]
impl TlsProbe for RustlsTlsProbe {
    async fn peer_certificate_present(&self, host: &str) -> Result<bool, ProbeError> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| ProbeError::Other(format!("Invalid server name {}: {}", host, e)))?;

        let tcp = TcpStream::connect((host, self.port)).await?;
        let mut stream = self.connector.connect(server_name, tcp).await?;

        let present = stream
            .get_ref()
            .1
            .peer_certificates()
            .is_some_and(|certs| !certs.is_empty());

        // Close right after the handshake
        if let Err(e) = stream.shutdown().await {
            debug!(host, error = %e, "TLS shutdown failed");
        }

        debug!(host, present, "TLS handshake completed");
        Ok(present)
    }
}
