mod contracts;
mod mock_querier;
