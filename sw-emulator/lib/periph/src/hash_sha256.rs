/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_sha256.rs

Abstract:

    File contains SHA-256 peripheral implementation.

--*/

use crate::sha_ip::ShaIp;
use sha_emu_crypto::Sha256;

/// SHA-256/224 Peripheral
pub type HashSha256 = ShaIp<Sha256>;
