// Single-instance coordination for desktop apps on Unix.
//
// One process per (user, app id) wins an election and keeps running; every
// later launch hands its activation over to the winner and exits. The host
// wires the pieces together: `election` first, then `listener` + `dispatch`
// on the winning side or `notifier` on the losing side.

pub mod dispatch;
pub mod election;
pub mod listener;
pub mod naming;
pub mod notifier;
