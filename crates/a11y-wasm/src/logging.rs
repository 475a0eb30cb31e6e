// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Routes `tracing` output to the browser console.

use std::sync::Once;
use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

static INSTALL: Once = Once::new();

/// Install the console subscriber. Later calls are no-ops.
pub fn init(max_level: Level) {
    INSTALL.call_once(|| {
        let config = WASMLayerConfigBuilder::new()
            .set_max_level(max_level)
            .set_report_logs_in_timings(false)
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    });
}
