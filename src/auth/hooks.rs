/**
 * Post-Registration Hooks
 *
 * Fire-and-forget side effects of a successful registration. The welcome
 * email itself is an external collaborator; this module is the dispatch
 * point. Failures here never affect the registration response.
 */

use crate::auth::users::User;

/// Dispatch the post-registration welcome notification
///
/// Detached from the request: the spawned task outlives the handler and
/// its outcome is only logged.
pub fn dispatch_welcome(user: &User) {
    let username = user.username.clone();
    let email = user.email.clone();
    tokio::spawn(async move {
        // Integration point for the external mail provider.
        tracing::info!("dispatching welcome notification for {} <{}>", username, email);
    });
}
