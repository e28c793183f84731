//! Aave v3 contract bindings.

use alloy::sol;

// Aave v3 PoolAddressesProvider (subset)
sol! {
    #[sol(rpc)]
    interface IPoolAddressesProvider {
        function getPool() external view returns (address);
        function getMarketId() external view returns (string memory);
    }
}

// Aave v3 Pool (subset)
sol! {
    #[sol(rpc)]
    interface IPool {
        function supply(
            address asset,
            uint256 amount,
            address onBehalfOf,
            uint16 referralCode
        ) external;

        event Supply(
            address indexed reserve,
            address user,
            address indexed onBehalfOf,
            uint256 amount,
            uint16 indexed referralCode
        );
    }
}

// Aave v3 WrappedTokenGatewayV3 (subset)
sol! {
    #[sol(rpc)]
    interface IWrappedTokenGateway {
        function depositETH(address pool, address onBehalfOf, uint16 referralCode)
            external
            payable;
    }
}
