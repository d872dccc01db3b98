pub mod audit;
pub mod contact;
pub mod functions;
pub mod health;
pub mod leads;

#[cfg(test)]
mod test_support;
