pub mod tools_route;
