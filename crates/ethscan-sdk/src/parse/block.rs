//! Block reward endpoint

use serde::Deserialize;

use crate::coerce::{parse_biguint_strict, parse_u64_lenient};
use crate::envelope::{from_result, Envelope};
use crate::types::{BlockReward, Uncle};
use crate::ScanError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawBlockReward {
    block_number: String,
    time_stamp: String,
    block_miner: String,
    block_reward: String,
    uncles: Vec<RawUncle>,
    uncle_inclusion_reward: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUncle {
    miner: String,
    #[serde(rename = "unclePosition")]
    uncle_position: String,
    // lower-case on the wire, unlike the parent's `blockReward`
    #[serde(rename = "blockreward")]
    block_reward: String,
}

/// Parse a `block/getblockreward` response
///
/// A block that does not exist yet comes back with an empty result and is
/// reported as [`ScanError::EmptyResult`].
pub fn parse_block_reward(body: &[u8]) -> Result<BlockReward, ScanError> {
    let result = Envelope::open_required(body, "block reward")?;
    let raw: RawBlockReward = from_result(result)?;

    let uncles = raw
        .uncles
        .into_iter()
        .map(|u| {
            Ok(Uncle {
                block_reward: parse_biguint_strict("uncle blockreward", &u.block_reward)?,
                uncle_position: parse_u64_lenient(&u.uncle_position),
                miner: u.miner,
            })
        })
        .collect::<Result<Vec<_>, ScanError>>()?;

    Ok(BlockReward {
        block_number: parse_u64_lenient(&raw.block_number),
        timestamp: parse_u64_lenient(&raw.time_stamp),
        block_miner: raw.block_miner,
        block_reward: parse_biguint_strict("blockReward", &raw.block_reward)?,
        uncle_inclusion_reward: parse_biguint_strict(
            "uncleInclusionReward",
            &raw.uncle_inclusion_reward,
        )?,
        uncles,
    })
}
