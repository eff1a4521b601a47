//! Injected Ethereum Provider via wasm-bindgen
//!
//! JavaScript interop for the EIP-1193 provider a browser wallet extension
//! places at `window.ethereum`. [`InjectedProvider`] adapts it to the
//! [`WalletProvider`] capability the lifecycle drives.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use ticket_core::error::LifecycleError;
use ticket_core::provider::{CallRequest, Receipt, RpcFailure, TransactionRequest, WalletProvider};

// ============================================================================
// EIP-1193 BINDINGS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function hasInjectedProvider() {
    return typeof window !== 'undefined'
        && typeof window.ethereum !== 'undefined'
        && window.ethereum !== null;
}

export async function ethereumRequest(method, params) {
    if (!window.ethereum) {
        throw { code: null, message: 'No injected Ethereum provider' };
    }

    try {
        return await window.ethereum.request({ method: method, params: params });
    } catch (error) {
        // Wallets throw a mix of Error instances and plain objects; flatten to
        // { code, message } so Rust can classify it.
        const nested = error && error.data && error.data.message;
        return Promise.reject({
            code: error && typeof error.code === 'number' ? error.code : null,
            message: nested || (error && error.message) || String(error),
        });
    }
}

export function onAccountsChanged(callback) {
    if (window.ethereum && typeof window.ethereum.on === 'function') {
        window.ethereum.on('accountsChanged', callback);
        return true;
    }
    return false;
}
")]
extern "C" {
    /// Whether `window.ethereum` exists
    fn hasInjectedProvider() -> bool;

    /// `window.ethereum.request({ method, params })`
    #[wasm_bindgen(catch)]
    async fn ethereumRequest(method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    /// Register an `accountsChanged` listener. Returns `false` if the
    /// provider has no event API.
    fn onAccountsChanged(callback: &Closure<dyn FnMut(JsValue)>) -> bool;
}

// ============================================================================
// PROVIDER SERVICE
// ============================================================================

/// Read the `{ code, message }` object thrown by `ethereumRequest`.
fn to_failure(value: JsValue) -> RpcFailure {
    match serde_wasm_bindgen::from_value::<RpcFailure>(value.clone()) {
        Ok(failure) => failure,
        Err(_) => {
            let message = value
                .as_string()
                .unwrap_or_else(|| format!("Provider error: {:?}", value));
            RpcFailure::new(None, message)
        }
    }
}

/// The wallet extension's provider.
#[derive(Clone, Debug)]
pub struct InjectedProvider {
    receipt_poll_ms: u32,
}

impl InjectedProvider {
    /// `None` when no wallet extension is installed.
    pub fn detect(receipt_poll_ms: u32) -> Option<Self> {
        if hasInjectedProvider() {
            log::debug!("[SESSION] window.ethereum present");
            Some(Self { receipt_poll_ms })
        } else {
            log::debug!("[SESSION] window.ethereum missing");
            None
        }
    }

    /// Forward external account changes to `handler`.
    ///
    /// The listener lives for the rest of the page.
    pub fn on_accounts_changed(&self, handler: impl Fn(Vec<Address>) + 'static) {
        let closure = Closure::wrap(Box::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<Address>>(value) {
                Ok(accounts) => handler(accounts),
                Err(e) => log::warn!("[SESSION] Unreadable accountsChanged payload: {}", e),
            }
        }) as Box<dyn FnMut(JsValue)>);

        if onAccountsChanged(&closure) {
            closure.forget();
        } else {
            log::warn!("[SESSION] Provider does not emit accountsChanged");
        }
    }

    async fn request<T, R>(&self, method: &str, params: &T) -> Result<R, RpcFailure>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_wasm_bindgen::to_value(params)
            .map_err(|e| RpcFailure::new(None, format!("Could not encode {} params: {}", method, e)))?;

        let result = ethereumRequest(method, params).await.map_err(to_failure)?;

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| RpcFailure::new(None, format!("Could not decode {} result: {}", method, e)))
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, LifecycleError> {
        self.request("eth_requestAccounts", &[(); 0])
            .await
            .map_err(RpcFailure::into_connection_error)
    }

    async fn current_accounts(&self) -> Result<Vec<Address>, LifecycleError> {
        self.request("eth_accounts", &[(); 0])
            .await
            .map_err(RpcFailure::into_read_error)
    }

    async fn call(&self, request: CallRequest) -> Result<Bytes, LifecycleError> {
        self.request("eth_call", &(request, "latest"))
            .await
            .map_err(RpcFailure::into_read_error)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, LifecycleError> {
        self.request("eth_sendTransaction", &[request])
            .await
            .map_err(RpcFailure::into_transaction_error)
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<Receipt, LifecycleError> {
        loop {
            let receipt: Option<Receipt> = self
                .request("eth_getTransactionReceipt", &[hash])
                .await
                .map_err(RpcFailure::into_transaction_error)?;

            match receipt {
                Some(receipt) if receipt.block_number.is_some() => return Ok(receipt),
                _ => TimeoutFuture::new(self.receipt_poll_ms).await,
            }
        }
    }
}
