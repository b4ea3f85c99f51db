pub mod basket_calculator;
pub mod pricing_resolver;
