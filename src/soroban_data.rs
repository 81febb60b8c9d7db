//! Builder for Soroban transaction data

use crate::error::Result;
use crate::serialization::{VarArray, XdrCodec};
use crate::xdr;

/// Assembles the footprint, resource limits and resource fee attached to a
/// Soroban transaction.
#[derive(Debug, Clone, Default)]
pub struct SorobanDataBuilder {
    resource_fee: i64,
    instructions: u32,
    disk_read_bytes: u32,
    write_bytes: u32,
    read_only: Vec<xdr::LedgerKey>,
    read_write: Vec<xdr::LedgerKey>,
    archived_entries: Vec<u32>,
}

impl SorobanDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing data, for example the result of a simulation.
    pub fn from_data(data: &xdr::SorobanTransactionData) -> Self {
        let archived_entries = match &data.ext {
            xdr::SorobanTransactionDataExt::V0 => Vec::new(),
            xdr::SorobanTransactionDataExt::V1(ext) => ext.archived_soroban_entries.to_vec(),
        };
        Self {
            resource_fee: data.resource_fee,
            instructions: data.resources.instructions,
            disk_read_bytes: data.resources.disk_read_bytes,
            write_bytes: data.resources.write_bytes,
            read_only: data.resources.footprint.read_only.to_vec(),
            read_write: data.resources.footprint.read_write.to_vec(),
            archived_entries,
        }
    }

    /// Starts from base64 XDR.
    pub fn from_xdr(encoded: &str) -> Result<Self> {
        Ok(Self::from_data(&xdr::SorobanTransactionData::from_xdr(encoded)?))
    }

    pub fn set_resource_fee(mut self, fee: i64) -> Self {
        self.resource_fee = fee;
        self
    }

    pub fn set_resources(mut self, instructions: u32, disk_read_bytes: u32, write_bytes: u32) -> Self {
        self.instructions = instructions;
        self.disk_read_bytes = disk_read_bytes;
        self.write_bytes = write_bytes;
        self
    }

    pub fn set_read_only(mut self, keys: Vec<xdr::LedgerKey>) -> Self {
        self.read_only = keys;
        self
    }

    pub fn set_read_write(mut self, keys: Vec<xdr::LedgerKey>) -> Self {
        self.read_write = keys;
        self
    }

    /// Marks read-write footprint entries, by index, as archived.
    pub fn set_archived_entries(mut self, indices: Vec<u32>) -> Self {
        self.archived_entries = indices;
        self
    }

    pub fn build(self) -> Result<xdr::SorobanTransactionData> {
        let ext = if self.archived_entries.is_empty() {
            xdr::SorobanTransactionDataExt::V0
        } else {
            xdr::SorobanTransactionDataExt::V1(xdr::SorobanResourcesExtV0 {
                archived_soroban_entries: VarArray::new(self.archived_entries)?,
            })
        };
        Ok(xdr::SorobanTransactionData {
            ext,
            resources: xdr::SorobanResources {
                footprint: xdr::LedgerFootprint {
                    read_only: VarArray::new(self.read_only)?,
                    read_write: VarArray::new(self.read_write)?,
                },
                instructions: self.instructions,
                disk_read_bytes: self.disk_read_bytes,
                write_bytes: self.write_bytes,
            },
            resource_fee: self.resource_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_key(byte: u8) -> xdr::LedgerKey {
        xdr::LedgerKey::ContractCode(xdr::LedgerKeyContractCode { hash: [byte; 32] })
    }

    #[test]
    fn test_defaults_are_zero() {
        let data = SorobanDataBuilder::new().build().unwrap();
        assert_eq!(data.resource_fee, 0);
        assert!(data.resources.footprint.read_only.is_empty());
        assert_eq!(data.ext, xdr::SorobanTransactionDataExt::V0);
    }

    #[test]
    fn test_builder_roundtrip_through_xdr() {
        let data = SorobanDataBuilder::new()
            .set_resource_fee(12_345)
            .set_resources(1_000_000, 2_000, 3_000)
            .set_read_only(vec![code_key(1)])
            .set_read_write(vec![code_key(2), code_key(3)])
            .set_archived_entries(vec![1])
            .build()
            .unwrap();

        let rebuilt = SorobanDataBuilder::from_xdr(&data.to_xdr().unwrap())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(rebuilt, data);
        assert_eq!(rebuilt.resources.footprint.read_write.len(), 2);
    }
}
