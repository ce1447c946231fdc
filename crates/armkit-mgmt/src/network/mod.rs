//! Network resource provider (`Microsoft.Network`)

mod hub_connections;
pub mod models;

pub use hub_connections::HubVirtualNetworkConnectionsClient;
pub use models::{
    HubVirtualNetworkConnection, HubVirtualNetworkConnectionProperties, PropagatedRouteTable,
    RoutingConfiguration, SubResource,
};
