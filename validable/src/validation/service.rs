//! Validation through an asynchronous remote check.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;

use super::{Validable, Validator};
use crate::error::ServiceError;
use crate::reactive::Observable;

/// What the remote check is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest<T> {
    pub value: T,
}

/// Outcome of a remote check: `Ok(Some(message))` reports an error,
/// `Ok(None)` accepts the value.
pub type ServiceResult = Result<Option<String>, ServiceError>;

type Service<T> = Arc<dyn Fn(ServiceRequest<T>) -> BoxFuture<'static, ServiceResult> + Send + Sync>;

/// Bookkeeping shared between the change listener and the spawned calls.
struct Pending<T> {
    /// Ticket of the most recent call.
    latest: u64,
    /// Value the most recent call was made for.
    checked: T,
}

/// Creates a validator factory that asks `service` about every new value.
///
/// On each write of a different value the validator marks itself as
/// validating and spawns the call on the current tokio runtime. Writing the
/// value that was last checked again does not issue a call. When the call
/// completes the returned message replaces the error and the flag is
/// cleared.
///
/// Calls are not cancelled when the value changes again. Each call gets a
/// ticket and only the result of the most recent one is applied, so a slow
/// answer about an old value cannot overwrite a newer one; `validating`
/// stays true until that most recent call settles. Issuing a ticket and
/// applying a result both happen under one lock, so listeners of this
/// validator must not write the target value synchronously.
///
/// A failed call is logged and clears `validating`; the previous error
/// message is kept.
///
/// # Example
///
/// ```ignore
/// let login = Validable::new(String::new()).with_validator(validate_service(
///     |request: ServiceRequest<String>| async move {
///         let taken = api.login_taken(&request.value).await?;
///         Ok(taken.then(|| "This login is already used".to_string()))
///     },
/// ));
/// ```
pub fn validate_service<T, S, Fut>(service: S) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: PartialEq + Clone + Send + Sync + 'static,
    S: Fn(ServiceRequest<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ServiceResult> + Send + 'static,
{
    let service: Service<T> = Arc::new(move |request| service(request).boxed());

    move |target| {
        let error_message: Observable<Option<String>> = Observable::new(None);
        let validating = Observable::new(false);
        let pending = Arc::new(Mutex::new(Pending {
            latest: 0,
            checked: target.peek(),
        }));

        let subscription = target.subscribe({
            let error_message = error_message.clone();
            let validating = validating.clone();
            move |value: &T| {
                let mut state = pending
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if state.checked == *value {
                    log::trace!("[validation] value unchanged, remote check skipped");
                    return;
                }
                state.checked = value.clone();
                state.latest += 1;
                let ticket = state.latest;
                validating.set(true);

                let handle = match Handle::try_current() {
                    Ok(handle) => handle,
                    Err(err) => {
                        log::error!("[validation] cannot run remote check without a tokio runtime: {err}");
                        validating.set(false);
                        return;
                    }
                };
                drop(state);

                let call = (*service)(ServiceRequest {
                    value: value.clone(),
                });
                let error_message = error_message.clone();
                let validating = validating.clone();
                let pending = Arc::clone(&pending);

                handle.spawn(async move {
                    let outcome = call.await;
                    let state = pending
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                    if state.latest != ticket {
                        log::debug!("[validation] discarding stale remote check result #{ticket}");
                        return;
                    }
                    match outcome {
                        Ok(message) => {
                            error_message.set(message);
                            validating.set(false);
                        }
                        Err(err) => {
                            log::warn!("[validation] remote check #{ticket} failed: {err}");
                            validating.set(false);
                        }
                    }
                    drop(state);
                });
            }
        });

        Validator::new(error_message)
            .with_validating(validating)
            .with_guard(subscription)
    }
}
