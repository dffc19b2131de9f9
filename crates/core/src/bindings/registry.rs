use alloy::sol;

sol! {
    #[sol(rpc)]
    contract FractalRegistry {
        function updateDAOName(string memory _name) external;
    }

    #[sol(rpc)]
    contract KeyValuePairs {
        function updateValues(string[] memory _keys, string[] memory _values) external;
    }
}

pub const FRACTAL_REGISTRY_ABI: &[&str] = &["function updateDAOName(string _name)"];

pub const KEY_VALUE_PAIRS_ABI: &[&str] =
    &["function updateValues(string[] _keys, string[] _values)"];
