//! Builds the transport, contract client and read cache used by front-ends.
use std::sync::Arc;

use anyhow::Result;
use client_blockchain_core::{BlockchainTransport, ReadCache};
use client_blockchain_evm::{ConfigError, ContractClient, JsonRpcTransport};
use league_core::PayloadBuilder;

use crate::config::AppConfig;

/// Builder that assembles the league client stack from configuration.
pub struct ClientBuilder {
    config: AppConfig,
    transport: Option<Arc<dyn BlockchainTransport>>,
    payload_builder: PayloadBuilder,
    verify_chain_id: bool,
}

impl ClientBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            transport: None,
            payload_builder: PayloadBuilder::default(),
            verify_chain_id: false,
        }
    }

    /// Provide a custom transport (defaults to JSON-RPC over the configured URL).
    pub fn transport(mut self, transport: impl BlockchainTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Provide a custom payload builder (e.g., another encoding backend).
    pub fn payload_builder(mut self, builder: PayloadBuilder) -> Self {
        self.payload_builder = builder;
        self
    }

    /// Ask the node for its chain id and fail on mismatch.
    pub fn verify_chain_id(mut self, enabled: bool) -> Self {
        self.verify_chain_id = enabled;
        self
    }

    pub async fn build(self) -> Result<ClientSetup> {
        self.config.evm.check()?;

        let transport: Arc<dyn BlockchainTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(JsonRpcTransport::from_config(&self.config.evm)?),
        };

        if self.verify_chain_id {
            let expected = self.config.evm.chain_id;
            let actual = transport.chain_id().await?;
            if actual != expected {
                return Err(ConfigError::ChainIdMismatch { expected, actual }.into());
            }
            tracing::debug!(chain_id = actual, "Chain id verified");
        }

        let client = Arc::new(ContractClient::new(
            self.config.evm.clone(),
            transport,
            self.payload_builder,
        )?);
        let cache = ReadCache::new(Arc::clone(&client), self.config.cache_ttl);

        tracing::info!(
            rpc_url = %client.config().get_rpc_url(),
            contract = %client.config().contract_address,
            "League client ready"
        );

        Ok(ClientSetup {
            config: self.config,
            client,
            cache,
        })
    }
}

pub struct ClientSetup {
    pub config: AppConfig,
    pub client: Arc<ContractClient>,
    pub cache: ReadCache<Arc<ContractClient>>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy_primitives::Address;
    use client_blockchain_core::{LeagueSubmitter, MockTransport};
    use client_blockchain_evm::EvmConfig;
    use league_core::TeamCreation;

    use super::*;

    fn config() -> AppConfig {
        let mut config =
            AppConfig::new(EvmConfig::default().with_contract_address(Address::repeat_byte(0x42)));
        config.cache_ttl = Duration::from_secs(5);
        config
    }

    #[tokio::test]
    async fn test_build_with_mock_transport() {
        let transport = MockTransport::new(11_155_111);
        let setup = ClientBuilder::new(config())
            .transport(transport.clone())
            .verify_chain_id(true)
            .build()
            .await
            .unwrap();

        assert_eq!(setup.cache.ttl(), Duration::from_secs(5));
        setup
            .client
            .submit_team_creation(TeamCreation::new("Alpha", 100))
            .await
            .unwrap();
        assert_eq!(transport.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_chain_id_mismatch() {
        let err = ClientBuilder::new(config())
            .transport(MockTransport::new(1))
            .verify_chain_id(true)
            .build()
            .await
            .err()
            .unwrap();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ChainIdMismatch {
                expected: 11_155_111,
                actual: 1
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let result = ClientBuilder::new(AppConfig::default())
            .transport(MockTransport::new(11_155_111))
            .build()
            .await;
        assert!(result.is_err());
    }
}
