pub mod fulfillment_pipeline;
