#![cfg(test)]
//! Engine-level tests run against mock sources; nothing here touches the network.

mod support;
