mod value_iteration;
