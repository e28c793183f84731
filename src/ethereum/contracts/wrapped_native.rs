//! WETH9-style wrapped native token bindings (WMATIC, WETH).

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IWrappedNative {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
        function approve(address guy, uint256 wad) external returns (bool);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        event Deposit(address indexed dst, uint256 wad);
        event Approval(address indexed src, address indexed guy, uint256 wad);
    }
}
