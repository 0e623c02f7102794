// Generate the main bindings in a private module. That allows us to re-export
// all items in our own module while also adding some items ourselves.
#[allow(non_snake_case)]
mod ReaperVaultv1_4Private {
    alloy::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        contract ReaperVaultv1_4 {
            constructor(
                address _token,
                string memory _name,
                string memory _symbol,
                uint256 _depositFee,
                uint256 _tvlCap
            );

            function initialize(address _strategy) public returns (bool);

            function initialized() external view returns (bool);
            function strategy() external view returns (address);
            function token() external view returns (address);
            function depositFee() external view returns (uint256);
            function tvlCap() external view returns (uint256);
        }
    );
}

#[allow(non_snake_case)]
pub mod ReaperVaultv1_4 {
    use alloy::providers::DynProvider;

    pub use super::ReaperVaultv1_4Private::*;

    /// Name under which the compiler emits the vault artifact.
    pub const NAME: &str = "ReaperVaultv1_4";

    pub type Instance = ReaperVaultv1_4::ReaperVaultv1_4Instance<DynProvider>;
}
