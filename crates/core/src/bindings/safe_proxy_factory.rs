use alloy::sol;

sol! {
    #[sol(rpc)]
    contract GnosisSafeProxyFactory {
        function proxyCreationCode() external pure returns (bytes memory code);
        function createProxyWithNonce(
            address _singleton,
            bytes memory initializer,
            uint256 saltNonce
        ) external returns (address proxy);
    }
}

pub const SAFE_PROXY_FACTORY_ABI: &[&str] = &[
    "function createProxyWithNonce(address _singleton, bytes initializer, uint256 saltNonce) returns (address proxy)",
];
