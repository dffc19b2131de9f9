use alloy::sol;

sol! {
    #[sol(rpc)]
    contract GnosisSafe {
        function setup(
            address[] calldata _owners,
            uint256 _threshold,
            address to,
            bytes calldata data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address paymentReceiver
        ) external;
        function execTransaction(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            bytes memory signatures
        ) external returns (bool success);
        function enableModule(address module) external;
        function addOwnerWithThreshold(address owner, uint256 _threshold) external;
        function removeOwner(address prevOwner, address owner, uint256 _threshold) external;
        function getOwners() external view returns (address[] memory owners);
        function getThreshold() external view returns (uint256 threshold);
        function isModuleEnabled(address module) external view returns (bool enabled);
        function nonce() external view returns (uint256 nonce);
    }
}

pub const GNOSIS_SAFE_ABI: &[&str] = &[
    "function setup(address[] _owners, uint256 _threshold, address to, bytes data, address fallbackHandler, address paymentToken, uint256 payment, address paymentReceiver)",
    "function execTransaction(address to, uint256 value, bytes data, uint8 operation, uint256 safeTxGas, uint256 baseGas, uint256 gasPrice, address gasToken, address refundReceiver, bytes signatures) returns (bool success)",
    "function enableModule(address module)",
    "function addOwnerWithThreshold(address owner, uint256 _threshold)",
    "function removeOwner(address prevOwner, address owner, uint256 _threshold)",
];
