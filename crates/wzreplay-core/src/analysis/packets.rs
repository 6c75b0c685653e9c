use std::collections::BTreeMap;

use crate::PacketSummary;
use crate::protocols::netplay::{classify, packet_name};

const UNKNOWN_NAME: &str = "UNKNOWN";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PacketStats {
    pub count: u64,
    pub bytes: u64,
}

/// Count one message; the sentinel is not counted.
pub(crate) fn add_packet_stats(
    stats: &mut BTreeMap<u8, PacketStats>,
    type_code: u8,
    payload_len: u32,
) {
    let entry = stats.entry(type_code).or_default();
    entry.count += 1;
    entry.bytes += u64::from(payload_len);
}

pub(crate) fn build_packet_summaries(stats: BTreeMap<u8, PacketStats>) -> Vec<PacketSummary> {
    stats
        .into_iter()
        .map(|(type_code, stats)| PacketSummary {
            type_code,
            name: packet_name(type_code).unwrap_or(UNKNOWN_NAME).to_string(),
            class: classify(type_code),
            count: stats.count,
            bytes: stats.bytes,
        })
        .collect()
}
